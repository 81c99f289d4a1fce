//! Shared UI crate for the UMAP explorer: selection/filter/series logic in
//! [`core`], page components in [`explorer`] and [`views`].

pub mod core;
pub mod explorer;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

#[cfg(test)]
mod tests {
    mod i18n_completeness;
}
