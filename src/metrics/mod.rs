// Metric descriptors, samples, and the text exposition format

mod desc;
mod exposition;
mod sample;

pub use desc::{MetricDescriptor, MetricKind, fq_name};
pub use exposition::{CONTENT_TYPE, render};
pub use sample::{MetricSample, MetricSink};
