pub mod panels;
pub mod plot;
pub mod sun_image;
