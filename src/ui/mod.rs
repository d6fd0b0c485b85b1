pub mod image_view;
pub mod panels;
pub mod spectral_view;
