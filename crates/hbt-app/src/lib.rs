// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod emoji;
pub mod form;
pub mod habits;
pub mod ids;
pub mod model;
pub mod picker;
pub mod service;

pub use emoji::*;
pub use form::*;
pub use habits::*;
pub use ids::*;
pub use model::*;
pub use picker::*;
pub use service::*;
