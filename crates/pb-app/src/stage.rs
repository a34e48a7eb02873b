/// Steps of one render cycle, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    LoadingData,
    EnumeratingKeys,
    AwaitingSelection,
    Filtering,
    Aligning,
    Rendering,
    Completed,
}

impl CycleStage {
    pub fn label(&self) -> &'static str {
        match self {
            CycleStage::LoadingData => "Loading data",
            CycleStage::EnumeratingKeys => "Listing entities",
            CycleStage::AwaitingSelection => "Awaiting selection",
            CycleStage::Filtering => "Filtering",
            CycleStage::Aligning => "Aligning series",
            CycleStage::Rendering => "Rendering",
            CycleStage::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CycleEvent {
    pub stage: CycleStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}
