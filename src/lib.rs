pub mod gradient;
pub mod icons;
pub mod manifest;
pub mod themes;
pub mod thumbnails;
