use std::fmt;

use crate::core::YfError;

/// The four requests a fetch can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Challenge,
    Consent,
    Crumb,
    Data,
}

impl Step {
    /// Lowercase step name, as used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Step::Challenge => "challenge",
            Step::Consent => "consent",
            Step::Crumb => "crumb",
            Step::Data => "data",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad class of an [`Anomaly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Network failure or non-2xx status.
    Transport,
    /// A marker was missing from a body being scraped.
    Scrape,
    /// A session parameter was still absent after its step.
    MissingToken,
}

/// Something that went wrong during a handshake step without stopping it.
#[derive(Debug)]
pub struct Anomaly {
    /// The step during which it happened.
    pub step: Step,
    /// What went wrong.
    pub error: YfError,
}

impl Anomaly {
    /// Pairs an error with the step it occurred in.
    pub fn new(step: Step, error: YfError) -> Self {
        Self { step, error }
    }

    /// Classifies the underlying error.
    pub fn kind(&self) -> AnomalyKind {
        match self.error {
            YfError::Scrape(_) => AnomalyKind::Scrape,
            YfError::MissingToken { .. } => AnomalyKind::MissingToken,
            _ => AnomalyKind::Transport,
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} step: {}", self.step, self.error)
    }
}

/// A value plus every anomaly met while producing it.
#[derive(Debug)]
pub struct StepOutcome<T> {
    /// The result of the step.
    pub value: T,
    /// Anomalies in the order they were recorded.
    pub anomalies: Vec<Anomaly>,
}

impl<T> StepOutcome<T> {
    /// An outcome with no anomalies yet.
    pub fn new(value: T) -> Self {
        Self {
            value,
            anomalies: Vec::new(),
        }
    }

    /// True when no anomaly was recorded.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub(crate) fn record(&mut self, step: Step, error: YfError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(step = %step, error = %error, "handshake anomaly");
        self.anomalies.push(Anomaly::new(step, error));
    }
}
