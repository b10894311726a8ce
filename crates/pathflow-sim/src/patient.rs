/// An entity flowing through the stage graph.
///
/// The pathway records, in order, the label of every stage the patient
/// passed through, ending with the terminal stage at discharge. Stages
/// skipped via an overflow transition are not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub id: u64,
    pub pathway: Vec<String>,
}

impl Patient {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            pathway: Vec::new(),
        }
    }
}
