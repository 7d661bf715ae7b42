//! Refresh-token cookie handling.

use axum::http::{header, HeaderMap, HeaderValue};

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefreshCookie {
    pub name: &'static str,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: &'static str,
    pub max_age_secs: i64,
}

impl RefreshCookie {
    /// Production cookies go cross-site to the frontend, so they need `SameSite=None; Secure`.
    pub fn new(secure: bool, max_age_secs: i64) -> Self {
        Self {
            name: REFRESH_COOKIE_NAME,
            secure,
            same_site: if secure { SameSite::None } else { SameSite::Lax },
            path: "/",
            max_age_secs,
        }
    }

    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, value);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", self.max_age_secs));
        cookie
    }

    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=; HttpOnly", self.name);
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}; Path={}; Max-Age=0", self.same_site.as_str(), self.path));
        cookie
    }

    pub fn set_header(&self, value: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value)).ok()
    }

    pub fn delete_header(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie()).ok()
    }
}

pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_cookie_is_http_only_lax() {
        let cookie = RefreshCookie::new(false, 3600).build_set_cookie("abc");
        assert_eq!(cookie, "refresh_token=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600");
    }

    #[test]
    fn production_cookie_is_secure_cross_site() {
        let cookie = RefreshCookie::new(true, 60).build_set_cookie("abc");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
    }

    #[test]
    fn delete_cookie_expires_immediately() {
        let cookie = RefreshCookie::new(false, 3600).build_delete_cookie();
        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.ends_with("Max-Age=0"));
    }

    #[test]
    fn extracts_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; refresh_token=tok123; other=x"),
        );
        assert_eq!(extract_cookie(&headers, REFRESH_COOKIE_NAME), Some("tok123".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }
}
