use mock_core::model::{Answer, GradedResult, PerformanceLevel};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionAnalysisVm {
    pub number: usize,
    pub your_answer: String,
    pub is_correct: bool,
    /// Only known when the scoring service reveals its answer key.
    pub correct_answer: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsVm {
    pub score_label: String,
    pub percentage: f64,
    pub percentage_label: String,
    pub level_label: &'static str,
    pub level_class: &'static str,
    pub correct: u32,
    pub incorrect: u32,
    pub feedback: String,
    pub questions: Vec<QuestionAnalysisVm>,
}

fn option_label(answer: Answer) -> String {
    match answer.selected() {
        Some(index) => format!("Option {}", index + 1),
        None => "Not answered".to_string(),
    }
}

fn level_class(level: PerformanceLevel) -> &'static str {
    match level {
        PerformanceLevel::Excellent => "level excellent",
        PerformanceLevel::VeryGood => "level very-good",
        PerformanceLevel::Good => "level good",
        PerformanceLevel::Fair => "level fair",
        PerformanceLevel::NeedsImprovement => "level needs-improvement",
    }
}

impl From<&GradedResult> for ResultsVm {
    fn from(result: &GradedResult) -> Self {
        let level = result.performance();
        let total = usize::try_from(result.total_questions()).unwrap_or(usize::MAX);
        let questions = (0..total)
            .map(|index| {
                let is_correct = result.is_correct(index);
                QuestionAnalysisVm {
                    number: index + 1,
                    your_answer: option_label(result.user_answer(index)),
                    is_correct,
                    correct_answer: if is_correct {
                        None
                    } else {
                        result
                            .correct_option(index)
                            .map(|option| option_label(Answer::Selected(option)))
                    },
                }
            })
            .collect();
        Self {
            score_label: format!("{}/{}", result.score(), result.total_questions()),
            percentage: result.percentage(),
            percentage_label: format!("{:.1}%", result.percentage()),
            level_label: level.label(),
            level_class: level_class(level),
            correct: result.correct_count(),
            incorrect: result.incorrect_count(),
            feedback: result.feedback_or_default().to_string(),
            questions,
        }
    }
}

#[must_use]
pub fn map_results(result: &GradedResult) -> ResultsVm {
    ResultsVm::from(result)
}
