mod home;
pub use home::Home;

mod umap;
pub use umap::Umap;
