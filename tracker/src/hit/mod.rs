// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

// Attach files.
pub mod event;
pub mod exception;
pub mod item;
pub mod page_view;
pub mod refund;
pub mod request;
pub mod screen_view;
pub mod social;
pub mod timing;
pub mod transaction;

// Re-export.
pub use event::*;
pub use exception::*;
pub use item::*;
pub use page_view::*;
pub use refund::*;
pub use request::*;
pub use screen_view::*;
pub use social::*;
pub use timing::*;
pub use transaction::*;
