pub mod explorer;
pub mod landing;
