use std::path::{Path, PathBuf};

use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use serde_json::json;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::InitError;
use crate::infrastructure::ChromePageDriver;

/// 启动用于下载的浏览器
///
/// 1. 校验浏览器路径和下载目录
/// 2. 写入下载偏好设置（不询问保存位置、允许自动下载多个文件）
/// 3. 启动浏览器并设置下载目录
///
/// 任何一步失败都是致命错误
pub async fn launch_download_browser(config: &Config) -> Result<ChromePageDriver, InitError> {
    info!("🚀 启动浏览器...");
    let download_dir = validate_paths(config)?;
    debug!("浏览器: {}", config.browser_executable.display());
    debug!("下载目录: {}", download_dir.display());

    write_download_preferences(&config.profile_dir, &download_dir).await?;

    let mut builder = BrowserConfig::builder()
        .chrome_executable(&config.browser_executable)
        .user_data_dir(&config.profile_dir)
        .args(vec!["--no-first-run", "--no-default-browser-check"]);
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    let browser_config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        InitError::BrowserConfig(e)
    })?;

    let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        InitError::BrowserLaunch { source: e }
    })?;
    debug!("浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let mut behavior = SetDownloadBehaviorParams::new(SetDownloadBehaviorBehavior::Allow);
    behavior.download_path = Some(download_dir.to_string_lossy().to_string());
    browser.execute(behavior).await.map_err(|e| {
        error!("设置下载目录失败: {}", e);
        InitError::BrowserLaunch { source: e }
    })?;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        InitError::BrowserLaunch { source: e }
    })?;

    info!("✅ 浏览器已启动，下载目录: {}", download_dir.display());
    Ok(ChromePageDriver::new(browser, page, handler_task))
}

/// 校验浏览器路径和下载目录，返回下载目录的绝对路径
pub fn validate_paths(config: &Config) -> Result<PathBuf, InitError> {
    if !config.browser_executable.is_file() {
        return Err(InitError::DriverNotFound {
            path: config.browser_executable.clone(),
        });
    }

    if !config.download_dir.is_dir() {
        return Err(InitError::DownloadDirMissing {
            path: config.download_dir.clone(),
        });
    }

    config
        .download_dir
        .canonicalize()
        .map_err(|_| InitError::DownloadDirMissing {
            path: config.download_dir.clone(),
        })
}

/// 写入浏览器偏好设置文件 `<profile_dir>/Default/Preferences`
pub async fn write_download_preferences(
    profile_dir: &Path,
    download_dir: &Path,
) -> Result<(), InitError> {
    let default_profile = profile_dir.join("Default");
    let prefs_path = default_profile.join("Preferences");

    let prefs = json!({
        "download": {
            "default_directory": download_dir.to_string_lossy(),
            "prompt_for_download": false,
            "directory_upgrade": true
        },
        "profile": {
            "default_content_setting_values": {
                "automatic_downloads": 1
            }
        }
    });

    let to_profile_error = |source| InitError::Profile {
        path: prefs_path.clone(),
        source,
    };
    tokio::fs::create_dir_all(&default_profile)
        .await
        .map_err(to_profile_error)?;
    tokio::fs::write(&prefs_path, prefs.to_string())
        .await
        .map_err(to_profile_error)?;

    debug!("已写入浏览器偏好设置: {}", prefs_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(browser: PathBuf, download_dir: PathBuf) -> Config {
        Config {
            browser_executable: browser,
            download_dir,
            ..Config::default()
        }
    }

    #[test]
    fn test_missing_browser_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with(tmp.path().join("no-such-chrome"), tmp.path().to_path_buf());

        let err = validate_paths(&config).unwrap_err();

        assert!(matches!(err, InitError::DriverNotFound { .. }));
    }

    #[test]
    fn test_missing_download_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let browser = tmp.path().join("chrome");
        std::fs::write(&browser, b"").unwrap();
        let config = config_with(browser, tmp.path().join("missing"));

        let err = validate_paths(&config).unwrap_err();

        assert!(matches!(err, InitError::DownloadDirMissing { .. }));
    }

    #[test]
    fn test_valid_paths_return_absolute_download_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let browser = tmp.path().join("chrome");
        std::fs::write(&browser, b"").unwrap();
        let config = config_with(browser, tmp.path().to_path_buf());

        let dir = validate_paths(&config).unwrap();

        assert!(dir.is_absolute());
        assert_eq!(dir, tmp.path().canonicalize().unwrap());
    }

    #[tokio::test]
    async fn test_write_download_preferences() {
        let tmp = tempfile::tempdir().unwrap();
        let profile = tmp.path().join("profile");
        let downloads = tmp.path().join("downloads");

        write_download_preferences(&profile, &downloads).await.unwrap();

        let content = std::fs::read_to_string(profile.join("Default").join("Preferences")).unwrap();
        let prefs: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(
            prefs["download"]["default_directory"],
            downloads.to_string_lossy().to_string()
        );
        assert_eq!(prefs["download"]["prompt_for_download"], false);
        assert_eq!(
            prefs["profile"]["default_content_setting_values"]["automatic_downloads"],
            1
        );
    }
}
