mod admin_vm;
mod results_vm;
mod test_vm;

pub use admin_vm::{AdminOptionVm, AdminRowVm, AdminVm, option_letter};
pub use results_vm::{QuestionAnalysisVm, ResultsVm, map_results};
pub use test_vm::{OptionVm, OverviewCellVm, QuestionCardVm, TestIntent, TestVm, start_test};
