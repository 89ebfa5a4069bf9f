//! Granted upload location value object

use reqwest::Url;

/// Where to write a recording and where it can be read afterwards.
///
/// `upload_target` is single-use: a retried upload asks for a fresh
/// location. `public_url` may be missing from a grant; that is only
/// detected once the write has gone through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLocation {
    upload_target: Url,
    public_url: Option<Url>,
}

impl UploadLocation {
    pub fn new(upload_target: Url, public_url: Option<Url>) -> Self {
        Self {
            upload_target,
            public_url,
        }
    }

    pub fn upload_target(&self) -> &Url {
        &self.upload_target
    }

    pub fn public_url(&self) -> Option<&Url> {
        self.public_url.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_and_public_may_coincide() {
        let url = Url::parse("https://bucket.example.com/recording-1.webm").unwrap();
        let location = UploadLocation::new(url.clone(), Some(url.clone()));
        assert_eq!(location.upload_target(), &url);
        assert_eq!(location.public_url(), Some(&url));
    }

    #[test]
    fn public_url_is_optional() {
        let url = Url::parse("https://bucket.example.com/put?sig=abc").unwrap();
        let location = UploadLocation::new(url, None);
        assert!(location.public_url().is_none());
    }
}
