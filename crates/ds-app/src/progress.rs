#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Validating,
    Simulating,
    Summarizing,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::Validating => "validating",
            RunStage::Simulating => "simulating",
            RunStage::Summarizing => "summarizing",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    /// Last completed day while simulating
    pub day: Option<usize>,
    pub duration_days: Option<u32>,
    pub fraction_complete: f64,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64) -> Self {
        let fraction_complete = if stage == RunStage::Completed {
            1.0
        } else {
            0.0
        };
        Self {
            stage,
            elapsed_wall_s,
            day: None,
            duration_days: None,
            fraction_complete,
        }
    }
}
