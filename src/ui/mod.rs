//! Server-rendered pages

pub mod pages;

pub use pages::Pages;
