pub mod error;
pub mod game;
pub mod helpers;
pub mod render;
pub mod scanner;

pub use error::QlogError;
pub use game::{summarize, Aggregator, GameSummary, KillRecord};
pub use render::{write_summary, OutputFormat};
pub use scanner::{events, from_fn, scan, CharSource, Event, ReaderSource};

pub fn version()->String{
    std::format!("{}-Alpha", env!("CARGO_PKG_VERSION"))
}
pub fn about()->String{
    "Per-game kill statistics from Quake 3 Arena server logs. \n\
    Copyright (c) 2021 Lucas Amaro, Joshua Vander Hook\n\n\
    This program comes with ABSOLUTELY NO WARRANTY.\n\
    It is free software under the MIT License, see the LICENSE\n\
    file shipped with qlog-tools for the terms. ".to_string()
}

#[cfg(test)]
mod test{
    #[test]
    fn test_version_has_pkg_version(){
        let v = super::version();
        assert!(v.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(v.ends_with("-Alpha"));
    }
    #[test]
    fn test_about_points_at_this_project(){
        let a = super::about();
        assert!(a.contains("MIT License"));
        assert!(a.contains("qlog-tools"));
        assert!(!a.contains("kda-tools"));
    }
}
