/// Identifier for one recognition job.
///
/// Completions carry the id they were started with; the model drops any
/// completion whose id no longer matches, which is how cancellation of an
/// in-flight request is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobId(u64);

/// Recognition lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No recognition work in progress.
    #[default]
    Idle,
    /// A job has been started and is expected to complete asynchronously.
    Running { job: JobId },
}

/// Minimal recognition job model.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
    next_job: u64,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Start a new job and return its id.
    pub fn start(&mut self) -> JobId {
        self.next_job += 1;
        let job = JobId(self.next_job);
        self.phase = Phase::Running { job };
        job
    }

    /// Mark `job` finished. Returns false for stale or cancelled jobs.
    pub fn finish(&mut self, job: JobId) -> bool {
        match self.phase {
            Phase::Running { job: current } if current == job => {
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Abandon the running job, if any. A later completion for it is stale.
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{Model, Phase};

    #[test]
    fn start_finish_roundtrip() {
        let mut m = Model::default();
        assert_eq!(m.phase(), Phase::Idle);

        let job = m.start();
        assert!(m.is_running());
        assert!(m.finish(job));
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn cancelled_job_completion_is_stale() {
        let mut m = Model::default();
        let job = m.start();
        m.cancel();

        assert!(!m.finish(job));
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn completion_for_superseded_job_is_dropped() {
        let mut m = Model::default();
        let first = m.start();
        m.cancel();
        let second = m.start();

        assert!(!m.finish(first));
        assert!(m.is_running());
        assert!(m.finish(second));
    }
}
