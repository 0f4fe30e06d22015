// Copyright @yucwang 2026

pub mod normal;
pub mod path;
