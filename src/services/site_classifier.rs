//! 网站识别
//!
//! 根据跳转后的当前链接判断录像所在网站

use crate::error::RetrievalError;
use crate::models::SiteKind;

/// 识别链接所属的网站
///
/// 按 `SiteKind::ALL` 的固定顺序依次检查域名片段，第一个命中的即为结果。
pub fn classify(url: &str) -> Result<SiteKind, RetrievalError> {
    SiteKind::ALL
        .into_iter()
        .find(|kind| url.contains(kind.domain_fragment()))
        .ok_or_else(|| RetrievalError::UnknownPlatform {
            url: url.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_webex() {
        assert_eq!(
            classify("https://company.webex.com/rec/abc").unwrap(),
            SiteKind::Webex
        );
        assert_eq!(
            classify("https://acme.webex.com/recordingservice/sites/acme/recording/play/123").unwrap(),
            SiteKind::Webex
        );
    }

    #[test]
    fn test_classify_zoom() {
        assert_eq!(classify("https://zoom.us/rec/xyz").unwrap(), SiteKind::Zoom);
        assert_eq!(
            classify("https://us02web.zoom.us/rec/share/xyz").unwrap(),
            SiteKind::Zoom
        );
    }

    #[test]
    fn test_classify_unknown() {
        let err = classify("https://example.com/x").unwrap_err();
        assert_eq!(
            err,
            RetrievalError::UnknownPlatform {
                url: "https://example.com/x".to_string()
            }
        );
    }

    #[test]
    fn test_classify_requires_dot_before_webex() {
        // 域名片段包含前导点，裸域名不算
        assert!(classify("https://webex.com/rec/abc").is_err());
    }

    #[test]
    fn test_classify_first_match_wins() {
        assert_eq!(
            classify("https://company.webex.com/redirect?to=zoom.us").unwrap(),
            SiteKind::Webex
        );
    }
}
