use serde::Serialize;

use crate::config::OutputFormat;
use crate::interpolate::Candidate;
use crate::solver::Reconstruction;

/// Printable summary of one reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub source: String,
    pub secret: String,
    pub suspects: Vec<u64>,
    pub support: usize,
    pub subsets: usize,
    pub distinct_candidates: usize,
}

impl Report {
    pub fn new<C: Candidate>(
        source: impl Into<String>,
        reconstruction: &Reconstruction<C>,
        hex: bool,
    ) -> Self {
        let secret = if hex {
            reconstruction.secret.to_hex_string()
        } else {
            reconstruction.secret.to_string()
        };

        Report {
            source: source.into(),
            secret,
            suspects: reconstruction.suspects.iter().copied().collect(),
            support: reconstruction.support,
            subsets: reconstruction.subsets,
            distinct_candidates: reconstruction.distinct_candidates,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn render_text(&self) -> String {
        let mut out = format!(
            "🔑 secret from {}: {}\n   support: {} of {} subsets ({} distinct candidates)\nLikely faulty shares (if any):\n",
            self.source, self.secret, self.support, self.subsets, self.distinct_candidates
        );
        for x in &self.suspects {
            out.push_str(&format!("⚠️  share ({x}) may be faulty.\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::BigInt;
    use crate::share::Point;
    use crate::solver::solve;

    fn reconstruction() -> Reconstruction<BigInt> {
        let points = vec![
            Point::new(1, BigInt::from(4)),
            Point::new(2, BigInt::from(7)),
            Point::new(3, BigInt::from(10)),
        ];
        solve(&points, 2).unwrap()
    }

    #[test]
    fn test_text_report() {
        let report = Report::new("case.json", &reconstruction(), false);
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.starts_with("🔑 secret from case.json: -15\n"));
        assert!(text.contains("support: 1 of 3 subsets (3 distinct candidates)"));
        assert!(text.contains("share (1) may be faulty."));
        assert!(text.contains("share (2) may be faulty."));
        assert!(!text.contains("share (3)"));
    }

    #[test]
    fn test_text_report_layout() {
        let report = Report::new("case.json", &reconstruction(), false);
        assert_eq!(
            report.render(OutputFormat::Text).unwrap(),
            "🔑 secret from case.json: -15\n\
             \x20  support: 1 of 3 subsets (3 distinct candidates)\n\
             Likely faulty shares (if any):\n\
             ⚠️  share (1) may be faulty.\n\
             ⚠️  share (2) may be faulty.\n"
        );

        let clean = Reconstruction {
            suspects: Default::default(),
            ..reconstruction()
        };
        let text = Report::new("clean.json", &clean, false)
            .render(OutputFormat::Text)
            .unwrap();
        assert!(text.ends_with("Likely faulty shares (if any):\n"));
    }

    #[test]
    fn test_json_report() {
        let report = Report::new("case.json", &reconstruction(), true);
        let json = report.render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["secret"], "-0x0f");
        assert_eq!(value["suspects"], serde_json::json!([1, 2]));
        assert_eq!(value["subsets"], 3);
    }
}
