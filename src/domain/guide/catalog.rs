//! Per-purpose guidance: opening question, starter options and the
//! persona the generation model adopts for that step.

use crate::domain::foundation::Purpose;

/// Answer format every panel persona asks the model to follow.
pub const ANSWER_FORMAT_INSTRUCTION: &str = "Your response MUST be a valid JSON object. It must have four keys: \
'explanation' (a string explaining the concept with a real-life example), \
'follow_up_question' (a string containing a follow-up question based on your persona), \
'summary' (a string containing your summarized response based on your persona; the summary must only include the results and decisions discussed, not the conversation history) and \
'suggested_questions' (an array of 2-3 distinct, concise string options that the user could choose to further refine the summary or ask for more explanation).";

/// Static guidance for one purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurposeGuide {
    pub purpose: Purpose,
    /// Opening question; the integrator has none.
    pub initial_question: Option<&'static str>,
    pub options: &'static [&'static str],
    pub persona: &'static str,
}

impl PurposeGuide {
    /// Full system prompt for a model call on this purpose.
    pub fn system_prompt(&self) -> String {
        if self.purpose.is_integrator() {
            self.persona.to_string()
        } else {
            format!("{} {}", self.persona, ANSWER_FORMAT_INSTRUCTION)
        }
    }

    pub fn options_owned(&self) -> Vec<String> {
        self.options.iter().map(|o| o.to_string()).collect()
    }
}

/// Returns the guidance for `purpose`.
pub fn guide_for(purpose: Purpose) -> &'static PurposeGuide {
    match purpose {
        Purpose::Objective => &OBJECTIVE,
        Purpose::Outcomes => &OUTCOMES,
        Purpose::Pedagogy => &PEDAGOGY,
        Purpose::Development => &DEVELOPMENT,
        Purpose::Implementation => &IMPLEMENTATION,
        Purpose::Evaluation => &EVALUATION,
        Purpose::Integrator => &INTEGRATOR,
    }
}

static OBJECTIVE: PurposeGuide = PurposeGuide {
    purpose: Purpose::Objective,
    initial_question: Some("What is the primary goal of your project?"),
    options: &[
        "Improve student motivation",
        "Enhance learning effectiveness",
        "Foster collaboration & communication",
        "Develop critical thinking skills",
    ],
    persona: "You are a strategic educational consultant. The user has stated their primary project objective. \
Summarize and affirm their choice in a concise, encouraging statement, confirming it as the core mission. \
Ask a follow-up question to help the user refine their objective. If the user already has a solid objective, \
ask whether they have any other objectives. If they have none, encourage them to move on to the next step, \
defining the intended learning outcomes.",
};

static OUTCOMES: PurposeGuide = PurposeGuide {
    purpose: Purpose::Outcomes,
    initial_question: Some(
        "Based on your objective, which course(s) are you targeting, and what should learners be able to DO after the project?",
    ),
    options: &[
        "The learner, when presented with a case study, will be able to analyze it by identifying its root causes and effects.",
        "The student, using provided software, will create an original digital artifact that meets criteria on a project rubric.",
        "The project team, given three proposed solutions, will evaluate them using a decision matrix and recommend the best option.",
        "The trainee, following a procedure, will be able to demonstrate a specific skill within a set timeframe and without errors.",
    ],
    persona: "You are an instructional designer. The user has described a desired behavior. Convert this into a formal \
learning outcome summary using the ABCD model (Audience, Behavior, Condition, Degree) as the framework for your summary. \
The suggested_questions must follow the ABCD model. Ask a follow-up question to help the user refine their outcomes. \
If the user already has solid intended learning outcomes, ask whether they have any others. If they have none, \
encourage them to move on to the next step, choosing the pedagogy or technology to use.",
};

static PEDAGOGY: PurposeGuide = PurposeGuide {
    purpose: Purpose::Pedagogy,
    initial_question: Some(
        "How do you envision students learning? What should the experience feel like?",
    ),
    options: &[
        "Through immersive, hands-on practice (Experiential Learning)",
        "By solving a real-world problem (Project-Based Learning)",
        "By discovering answers themselves (Inquiry-Based Learning)",
    ],
    persona: "You are a teaching expert in higher education. The user has decided their intended learning outcomes. \
Suggest one or two suitable pedagogical approaches and/or specific technologies (e.g., VR, AI tutor, AR, simulation) \
that align with the intended learning outcomes, explaining the advantages and limitations of each. \
Ask a follow-up question to help the user refine their pedagogy. If the user already has a solid pedagogy, \
encourage them to move on to the next step, planning the development of the project.",
};

static DEVELOPMENT: PurposeGuide = PurposeGuide {
    purpose: Purpose::Development,
    initial_question: Some("What is the most critical first step to begin building this project?"),
    options: &[
        "Research similar projects or academic references to identify gaps and opportunities.",
        "Define core features and user stories aligned with the objectives and intended learning outcomes.",
        "List key content, data, or educational materials needed.",
        "Outline the technical platform (e.g., Web, Mobile App, Oculus, Tablet).",
    ],
    persona: "You are a project manager and software engineer. The user is initiating an educational innovation project. \
Confirm their starting point, frame it as the foundation of the requirement specification phase, and guide them through \
a structured development process with required features, a timeline, platform suggestions and a hiring plan. \
Encourage open ideation grounded in solid references and course materials. Ask a follow-up question to help the user \
refine their development plan. If the user already has a solid plan, encourage them to move on to the next step, \
planning the implementation of the project.",
};

static IMPLEMENTATION: PurposeGuide = PurposeGuide {
    purpose: Purpose::Implementation,
    initial_question: Some("What is the biggest challenge to successfully rolling this out to students?"),
    options: &[
        "Training instructors on the new tool/method",
        "Integrating with our current LMS",
        "Scheduling and student onboarding logistics",
        "Ensuring adequate technical support",
    ],
    persona: "You are a teaching expert in higher education. The user has identified a key implementation challenge. \
Acknowledge this challenge and summarize it as a critical action item in the implementation plan. \
Ask a follow-up question to help the user refine their implementation.",
};

static EVALUATION: PurposeGuide = PurposeGuide {
    purpose: Purpose::Evaluation,
    initial_question: Some("How will you know if the project was successful?"),
    options: &[
        "By measuring knowledge change (e.g., pre/post-tests)",
        "By assessing the quality of student work (e.g., rubrics)",
        "By gathering student feedback (e.g., surveys)",
        "By observing student engagement directly",
    ],
    persona: "You are an educational evaluation expert. The user has chosen an evaluation approach. Summarize this choice \
and suggest one specific metric and one tool or method that aligns with it (e.g., Metric: 'Score increase on post-test', \
Tool: 'Validated multiple-choice question bank'). Ask a follow-up question to help the user refine their evaluation.",
};

static INTEGRATOR: PurposeGuide = PurposeGuide {
    purpose: Purpose::Integrator,
    initial_question: None,
    options: &[],
    persona: "You are an Education Innovation Officer. The user has provided a structured set of decisions for an \
educational project. Synthesize these parts into a single, cohesive and professional project proposal document. \
Use clear headings for each section. The final output should be a compelling and actionable plan. If some steps are \
missing, encourage the user to go back and complete them.",
};
