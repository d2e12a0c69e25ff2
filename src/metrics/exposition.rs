// Prometheus text exposition format (version 0.0.4).

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use super::{MetricDescriptor, MetricSample};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders `samples` grouped into families, in the order of `descriptors`.
/// Families without samples are omitted; samples whose descriptor is not listed are skipped.
pub fn render(descriptors: &[Arc<MetricDescriptor>], samples: Vec<MetricSample>) -> String {
    let mut families: HashMap<String, Vec<MetricSample>> = HashMap::new();
    for sample in samples {
        families
            .entry(sample.desc().name().to_string())
            .or_default()
            .push(sample);
    }

    let mut output = String::new();
    for desc in descriptors {
        let Some(mut family) = families.remove(desc.name()) else {
            continue;
        };
        family.sort_by(|a, b| a.label_values().cmp(b.label_values()));

        let _ = writeln!(output, "# HELP {} {}", desc.name(), escape_help(desc.help()));
        let _ = writeln!(output, "# TYPE {} {}", desc.name(), desc.kind().as_str());
        for sample in &family {
            write_sample(&mut output, desc, sample);
        }
    }
    output
}

fn write_sample(output: &mut String, desc: &MetricDescriptor, sample: &MetricSample) {
    output.push_str(desc.name());
    if !desc.label_keys().is_empty() {
        let labels: Vec<String> = desc
            .label_keys()
            .iter()
            .zip(sample.label_values())
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
            .collect();
        let _ = write!(output, "{{{}}}", labels.join(","));
    }
    let _ = writeln!(output, " {}", format_value(sample.value()));
}

fn escape_label_value(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricKind;

    fn sample(desc: &Arc<MetricDescriptor>, v: f64, labels: &[&str]) -> MetricSample {
        MetricSample::new(desc, v, labels.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn renders_help_type_and_labelled_lines() {
        let d = MetricDescriptor::new(
            "linode_instance_count",
            "The total number of Linodes",
            &["id", "label", "region"],
            MetricKind::Gauge,
        );
        let out = render(&[d.clone()], vec![sample(&d, 3.0, &["", "", ""])]);
        assert_eq!(
            out,
            "# HELP linode_instance_count The total number of Linodes\n\
             # TYPE linode_instance_count gauge\n\
             linode_instance_count{id=\"\",label=\"\",region=\"\"} 3\n"
        );
    }

    #[test]
    fn omits_families_without_samples_and_keeps_descriptor_order() {
        let a = MetricDescriptor::counter("a_total", "A", &[]);
        let b = MetricDescriptor::gauge("b", "B", &[]);
        let c = MetricDescriptor::gauge("c", "C", &[]);
        let out = render(
            &[a.clone(), b.clone(), c.clone()],
            vec![sample(&c, 1.5, &[]), sample(&a, 1.0, &[])],
        );
        let a_pos = out.find("# HELP a_total").unwrap();
        let c_pos = out.find("# HELP c").unwrap();
        assert!(a_pos < c_pos);
        assert!(!out.contains("# HELP b "));
        assert!(out.contains("c 1.5\n"));
    }

    #[test]
    fn sorts_samples_within_family() {
        let d = MetricDescriptor::gauge("m", "h", &["id"]);
        let out = render(&[d.clone()], vec![sample(&d, 2.0, &["b"]), sample(&d, 1.0, &["a"])]);
        let a = out.find("m{id=\"a\"} 1").unwrap();
        let b = out.find("m{id=\"b\"} 2").unwrap();
        assert!(a < b);
    }

    #[test]
    fn skips_undescribed_samples() {
        let known = MetricDescriptor::gauge("known", "h", &[]);
        let stray = MetricDescriptor::gauge("stray", "h", &[]);
        let out = render(&[known.clone()], vec![sample(&stray, 1.0, &[])]);
        assert!(out.is_empty());
    }

    #[test]
    fn escapes_label_values_and_help() {
        assert_eq!(escape_label_value("say \"hi\"\\\n"), "say \\\"hi\\\"\\\\\\n");
        assert_eq!(escape_help("a\\b\nc"), "a\\\\b\\nc");
    }

    #[test]
    fn formats_special_values() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(45.0), "45");
        assert_eq!(format_value(4.5), "4.5");
    }
}
