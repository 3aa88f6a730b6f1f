pub mod error;
pub mod game;
pub mod model;
pub mod scoring;

pub use error::GameError;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "sushigo"
    }

    pub const fn codename() -> &'static str {
        "Draft Simulator"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "sushigo");
        assert_eq!(AppInfo::codename(), "Draft Simulator");
        assert!(!AppInfo::version().is_empty());
    }
}
