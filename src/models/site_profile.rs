use std::fmt;

/// 支持的录像网站
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// Webex 录像
    Webex,
    /// Zoom 录像
    Zoom,
}

impl SiteKind {
    /// 按分类顺序排列的所有网站
    pub const ALL: [SiteKind; 2] = [SiteKind::Webex, SiteKind::Zoom];

    /// 用于识别网站的域名片段
    pub fn domain_fragment(self) -> &'static str {
        match self {
            SiteKind::Webex => ".webex.com",
            SiteKind::Zoom => "zoom.us",
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            SiteKind::Webex => "webex",
            SiteKind::Zoom => "zoom",
        }
    }

    /// 获取该网站的页面元素定位表
    pub fn profile(self) -> &'static SiteProfile {
        match self {
            SiteKind::Webex => &WEBEX_PROFILE,
            SiteKind::Zoom => &ZOOM_PROFILE,
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 网站页面元素定位（XPath）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub kind: SiteKind,
    /// 密码输入框
    pub password_field: &'static str,
    /// 提交按钮
    pub submit_button: &'static str,
    /// 下载按钮
    pub download_button: &'static str,
}

static WEBEX_PROFILE: SiteProfile = SiteProfile {
    kind: SiteKind::Webex,
    password_field: r#"//*[@id="meeting-password-form"]/div/div[1]/input"#,
    submit_button: r#"//*[@id="meeting-password-form"]/button"#,
    download_button: r#"//*[@class="icon-download recordingDownload"]"#,
};

static ZOOM_PROFILE: SiteProfile = SiteProfile {
    kind: SiteKind::Zoom,
    password_field: r#"//*[@id="password"]"#,
    submit_button: r#"//*[@id="password_form"]/div/div/button"#,
    download_button: r#"//*[@class="download"]"#,
};
