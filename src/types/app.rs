/// Host apps known to open links in their own in-app browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum App {
    Facebook,
    Instagram,
    Twitter,
    LinkedIn,
}

impl App {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "facebook" => Some(Self::Facebook),
            "instagram" => Some(Self::Instagram),
            "twitter" => Some(Self::Twitter),
            "linkedin" => Some(Self::LinkedIn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
        }
    }
}
