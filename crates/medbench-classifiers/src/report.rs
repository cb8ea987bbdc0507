//! Plain-text rendering of evaluation reports.
use std::fmt;

use crate::metrics::EvaluationResult;
use crate::runner::{DatasetReport, ModelRun};

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    accuracy: {}", self.accuracy)?;
        for (label, scores) in &self.per_class {
            writeln!(
                f,
                "    {}: precision {} recall {} f1 {}",
                label, scores.precision, scores.recall, scores.f1
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for ModelRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {} (train {}, test {}, {} averaging)",
            self.model, self.n_train, self.n_test, self.result.averaging
        )?;
        write!(f, "{}", self.result)
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dataset)?;
        writeln!(
            f,
            "  {} samples, {} features",
            self.n_samples, self.n_features
        )?;
        writeln!(f, "  labels: {}", self.distribution)?;
        for run in &self.runs {
            write!(f, "{}", run)?;
        }
        Ok(())
    }
}
