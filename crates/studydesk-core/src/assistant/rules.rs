//! Ordered keyword rules for the local responder.
//!
//! Matching is case-insensitive substring search, evaluated in a single pass
//! over the list. Order is load-bearing: a question like "exam stress" hits
//! several keyword sets, and whichever rule is checked first wins, so the
//! list below must not be reordered.

use indoc::indoc;

/// A `(keywords, answer)` pair. The first rule with any keyword contained in
/// the lowercased question supplies the answer.
pub struct TopicRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

pub const RULES: &[TopicRule] = &[
    TopicRule {
        topic: "study-tips",
        keywords: &["how to study", "study tips"],
        answer: indoc! {r#"
            Here are effective study tips:

            1. Pomodoro Technique: study for 25 minutes, then take a 5-minute break
            2. Active Recall: test yourself instead of just re-reading
            3. Spaced Repetition: review material at increasing intervals
            4. Teach Others: explaining concepts helps reinforce learning
            5. Mind Maps: create visual connections between concepts
            6. Study Environment: find a quiet, well-lit space
            7. Sleep Well: 7-8 hours of sleep improves memory retention"#},
    },
    TopicRule {
        topic: "time-management",
        keywords: &["time management", "organize time"],
        answer: indoc! {r#"
            Time Management Strategies:

            - Use the timetable feature to create a balanced schedule
            - Prioritize subjects based on difficulty and deadlines
            - Block time for specific subjects (time blocking)
            - Use the pomodoro timer to maintain focus
            - Schedule breaks to avoid burnout
            - Track your streak to build consistency
            - Set daily goals and review progress weekly"#},
    },
    TopicRule {
        topic: "exam",
        keywords: &["exam", "test"],
        answer: indoc! {r#"
            Exam Preparation Guide:

            - Start early (at least 2 weeks before)
            - Create a study schedule using the timetable
            - Make summary notes for each topic
            - Practice past papers and questions
            - Focus on weak areas first
            - Study in short, focused sessions
            - Get enough sleep before the exam
            - Review notes on exam morning
            - Stay calm and manage stress"#},
    },
    TopicRule {
        topic: "memory",
        keywords: &["memory", "remember", "memorize"],
        answer: indoc! {r#"
            Memory Enhancement Techniques:

            1. Mnemonics: create acronyms or phrases
            2. Chunking: break information into smaller pieces
            3. Visualization: create mental images
            4. Association: link new info to what you know
            5. Repetition: review multiple times
            6. Teaching: explain to someone else
            7. Sleep: consolidates memories
            8. Exercise: improves brain function"#},
    },
    TopicRule {
        topic: "motivation",
        keywords: &["motivation", "focus", "concentrate"],
        answer: indoc! {r#"
            Boost Your Motivation & Focus:

            - Set clear, specific goals
            - Break tasks into smaller steps
            - Use the pomodoro technique
            - Remove distractions (phone, social media)
            - Study in a dedicated space
            - Reward yourself after completing tasks
            - Track your progress and streaks
            - Join study groups for accountability
            - Remember your 'why' - your goals"#},
    },
    TopicRule {
        topic: "note-taking",
        keywords: &["notes", "note-taking", "note taking"],
        answer: indoc! {r#"
            Effective Note-Taking Methods:

            - Cornell Method: divide the page into sections
            - Mind Mapping: visual, branching diagrams
            - Outline Method: hierarchical bullet points
            - Flow Notes: combine text and diagrams
            - SQ3R: Survey, Question, Read, Recite, Review

            Tips:
            - Use colors and highlighters
            - Review notes within 24 hours
            - Add examples and connections"#},
    },
    TopicRule {
        topic: "math-science",
        keywords: &["math", "science", "physics", "chemistry"],
        answer: indoc! {r#"
            Math & Science Study Tips:

            - Practice problems daily
            - Understand concepts, don't just memorize
            - Work through examples step-by-step
            - Create formula sheets
            - Draw diagrams and graphs
            - Study with practice tests
            - Form study groups
            - Watch educational videos
            - Ask questions when stuck"#},
    },
    TopicRule {
        topic: "reading",
        keywords: &["reading", "comprehension"],
        answer: indoc! {r#"
            Reading & Comprehension Tips:

            - Preview: scan headings and summaries
            - Active Reading: highlight and annotate
            - Ask Questions: what, why, how?
            - Summarize: write in your own words
            - Visualize: create mental images
            - Connect: link to prior knowledge
            - Review: reread difficult sections
            - Discuss: talk about what you read"#},
    },
    TopicRule {
        topic: "stress",
        keywords: &["stress", "anxiety", "overwhelmed"],
        answer: indoc! {r#"
            Managing Study Stress:

            - Take regular breaks
            - Exercise daily (even 15 minutes helps)
            - Practice deep breathing
            - Get 7-8 hours of sleep
            - Eat healthy meals
            - Stay hydrated
            - Talk to friends and family
            - Use the pomodoro timer to avoid burnout
            - Remember: it's okay to ask for help!"#},
    },
];

/// Answer a question: first matching rule wins, otherwise the help menu.
pub fn respond(question: &str) -> String {
    let lowered = question.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|k| lowered.contains(k)) {
            return rule.answer.to_string();
        }
    }
    default_response(question)
}

/// Help menu returned when no rule matches; echoes the question verbatim.
pub fn default_response(question: &str) -> String {
    format!(
        indoc! {r#"
            I can help you with:

            - Study tips and techniques
            - Time management strategies
            - Exam preparation advice
            - Memory improvement methods
            - Motivation and focus tips
            - Note-taking strategies
            - Subject-specific guidance
            - Stress management

            Your question: "{question}"

            Try asking about specific topics like:
            - "How to study effectively?"
            - "Tips for time management"
            - "How to prepare for exams?"
            - "How to improve memory?"
            - "How to stay motivated?""#},
        question = question
    )
}
