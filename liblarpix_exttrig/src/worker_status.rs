/// Identifies which logical run a status message belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunKind {
    #[default]
    Signal,
    Background,
}

impl RunKind {
    /// Short tag used in output file names.
    pub fn suffix(&self) -> &'static str {
        match self {
            RunKind::Signal => "sig",
            RunKind::Background => "bkg",
        }
    }
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunKind::Signal => write!(f, "signal"),
            RunKind::Background => write!(f, "background"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum BarColor {
    #[default]
    CYAN,
    MAGENTA,
    RED,
    GREEN,
}

#[derive(Debug, Clone, Default)]
pub struct WorkerStatus {
    pub progress: f32,
    pub run: RunKind,
    pub worker_id: usize,
    pub color: BarColor,
}

impl WorkerStatus {
    pub fn new(progress: f32, run: RunKind, worker_id: usize, color: BarColor) -> Self {
        Self {
            progress,
            run,
            worker_id,
            color,
        }
    }
}
