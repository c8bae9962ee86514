//! Use case implementations.

mod search_paginator;

pub use search_paginator::SearchPaginator;
