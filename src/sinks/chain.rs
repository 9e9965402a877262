//! Fan-out to several sinks in order

use crate::error::SubmissionError;
use crate::form::{Submission, SubmissionSink};

/// Forwards each submission to every sink in turn, stopping at the first
/// error
#[derive(Default)]
pub struct SinkChain {
    sinks: Vec<Box<dyn SubmissionSink>>,
}

impl SinkChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SubmissionSink + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn push(&mut self, sink: impl SubmissionSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for SinkChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkChain")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl SubmissionSink for SinkChain {
    fn submit(&mut self, submission: &Submission) -> Result<(), SubmissionError> {
        for sink in &mut self.sinks {
            sink.submit(submission)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldMap, SessionId, SubmissionId};
    use chrono::Utc;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn submission() -> Submission {
        Submission {
            id: SubmissionId::new(),
            session_id: SessionId::new(),
            form: "membership".into(),
            attempt: 1,
            submitted_at: Utc::now(),
            fields: FieldMap::new(),
            secrets: Default::default(),
        }
    }

    fn recorder(
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
        fail: bool,
    ) -> impl FnMut(&Submission) -> Result<(), SubmissionError> {
        let log = Rc::clone(log);
        move |_: &Submission| {
            log.borrow_mut().push(name);
            if fail {
                Err(SubmissionError::Rejected(name.to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_forwards_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = SinkChain::new()
            .with(recorder(&log, "first", false))
            .with(recorder(&log, "second", false));

        chain.submit(&submission()).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_stops_at_first_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = SinkChain::new()
            .with(recorder(&log, "first", true))
            .with(recorder(&log, "second", false));

        let err = chain.submit(&submission()).unwrap_err();
        assert_eq!(err, SubmissionError::Rejected("first".into()));
        assert_eq!(*log.borrow(), vec!["first"]);
    }

    #[test]
    fn test_empty_chain_accepts() {
        let mut chain = SinkChain::new();
        assert!(chain.is_empty());
        chain.submit(&submission()).unwrap();
    }
}
