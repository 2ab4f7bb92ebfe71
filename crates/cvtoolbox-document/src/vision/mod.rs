// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vision module — grayscale, Gaussian blur, Canny edges and SIFT features,
// collected into a result store by the aggregator.

pub mod aggregator;
pub mod buffer;
pub mod features;
pub mod ops;
pub mod store;

pub use aggregator::ResultAggregator;
pub use buffer::ImageBuffer;
pub use store::{ResultStore, ResultValue};
