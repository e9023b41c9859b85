//! Prompt templates and sampling profiles for each generation kind.
//!
//! Pure data. Swapping the template text changes nothing about the control
//! flow in [`super::generate`]; the source text is always embedded between
//! the literal `===` delimiter markers.

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingProfile {
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens.
    pub max_tokens: u32,
}

/// The kind of study aid to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    /// A prose summary of the source text.
    Summary,
    /// A quiz (multiple-choice and short-answer items).
    Quiz,
    /// Assignment/project ideas.
    Assignments,
}

impl GenerationKind {
    /// All kinds in generation order: summary, then quiz, then assignments.
    pub const ORDER: [GenerationKind; 3] = [
        GenerationKind::Summary,
        GenerationKind::Quiz,
        GenerationKind::Assignments,
    ];

    /// The system role description for this kind.
    pub fn system_prompt(self) -> &'static str {
        match self {
            GenerationKind::Summary => {
                "You are a teaching assistant who summarizes university lecture \
                 material so it is easy to understand. Explain difficult terms \
                 in simple language."
            }
            GenerationKind::Quiz => {
                "You are a teaching assistant who writes exam questions for \
                 university courses. Produce clean questions that test the \
                 student's understanding."
            }
            GenerationKind::Assignments => {
                "You are an educational assistant who designs assignments and \
                 projects for university courses. Propose work of realistic \
                 difficulty."
            }
        }
    }

    /// Builds the user message for this kind, embedding the source text.
    pub fn user_prompt(self, text: &str) -> String {
        match self {
            GenerationKind::Summary => format!(
                "The following is the text of lecture or course material.\n\
                 Summarize the key content in about 5-7 sentences for an \
                 undergraduate reader.\n\
                 \n\
                 - Organize around the core concepts\n\
                 - Cut redundant examples; unpack each important concept in a \
                 sentence or two\n\
                 \n\
                 === SOURCE TEXT START ===\n\
                 {text}\n\
                 === SOURCE TEXT END ===\n"
            ),
            GenerationKind::Quiz => format!(
                "Create a quiz based on the lecture content below.\n\
                 \n\
                 [Requirements]\n\
                 1. 3 multiple-choice questions\n\
                 \x20  - 4 options per question, labeled (1) (2) (3) (4)\n\
                 \x20  - Include the answer number and a one-line explanation\n\
                 2. 2 short-answer questions\n\
                 \x20  - Answerable in one or two lines\n\
                 \x20  - Include a one-line model answer\n\
                 3. Follow the output layout in the example below.\n\
                 \n\
                 [Example output layout]\n\
                 \n\
                 [Multiple choice 1]\n\
                 Q. Question text...\n\
                 (1) Option 1\n\
                 (2) Option 2\n\
                 (3) Option 3\n\
                 (4) Option 4\n\
                 Answer: (2)\n\
                 Explanation: ...\n\
                 \n\
                 [Multiple choice 2]\n\
                 ...\n\
                 \n\
                 [Short answer 1]\n\
                 Q. Question text...\n\
                 Model answer: ...\n\
                 \n\
                 [Short answer 2]\n\
                 ...\n\
                 \n\
                 === LECTURE TEXT START ===\n\
                 {text}\n\
                 === LECTURE TEXT END ===\n"
            ),
            GenerationKind::Assignments => format!(
                "Based on the course content below, propose 2 assignment or \
                 project ideas that an undergraduate could complete within 1-2 \
                 weeks.\n\
                 \n\
                 [Conditions]\n\
                 - Each assignment must follow this structure:\n\
                 \x20 1) Assignment title\n\
                 \x20 2) Goal (2-3 lines)\n\
                 \x20 3) Activities (3-5 lines, concrete tasks)\n\
                 \x20 4) Evaluation points (2-3 lines, what will be graded)\n\
                 \n\
                 === COURSE TEXT START ===\n\
                 {text}\n\
                 === COURSE TEXT END ===\n"
            ),
        }
    }

    /// The fixed sampling profile for this kind.
    ///
    /// Summary favors a short, deterministic answer; the quiz and assignment
    /// prompts get more headroom and a slightly higher temperature.
    pub fn sampling(self) -> SamplingProfile {
        match self {
            GenerationKind::Summary => SamplingProfile {
                temperature: 0.3,
                max_tokens: 1024,
            },
            GenerationKind::Quiz => SamplingProfile {
                temperature: 0.5,
                max_tokens: 2048,
            },
            GenerationKind::Assignments => SamplingProfile {
                temperature: 0.6,
                max_tokens: 2048,
            },
        }
    }
}
