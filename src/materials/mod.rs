// Copyright @yucwang 2026

pub mod diffuse;
pub mod mixture;
pub mod phong;
