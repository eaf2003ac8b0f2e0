//! Prompt and fallback plan assembly
//!
//! Both texts are built from lists of sections; optional profile fields
//! contribute a line only when they carry non-blank text.

use diet_planner_shared::{BmiResult, FitnessGoal, UserProfile};

/// Sections the generated plan is asked to contain, in order
pub const PLAN_SECTIONS: &[&str] = &[
    "Weekly Meal Plan",
    "Daily Calorie Intake",
    "Exercise Routine",
    "Hydration and Recovery Tips",
];

/// Calorie and macro guidance for the fallback plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalorieGuidance {
    pub calories: &'static str,
    pub macros: &'static str,
    pub focus: &'static str,
}

/// Guidance keyed on the fitness goal only
///
/// Build-muscle and maintain share the default bucket.
pub fn calorie_guidance(goal: FitnessGoal) -> CalorieGuidance {
    match goal {
        FitnessGoal::LoseWeight => CalorieGuidance {
            calories: "1500-1800",
            macros: "40% protein, 30% carbohydrates, 30% fat",
            focus: "a moderate calorie deficit with high-protein, high-fiber meals",
        },
        FitnessGoal::GainWeight => CalorieGuidance {
            calories: "2500-2800",
            macros: "30% protein, 45% carbohydrates, 25% fat",
            focus: "a steady calorie surplus from nutrient-dense whole foods",
        },
        _ => CalorieGuidance {
            calories: "2000-2200",
            macros: "30% protein, 40% carbohydrates, 30% fat",
            focus: "balanced meals that keep energy steady through the day",
        },
    }
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Optional profile lines as `(label, value)` pairs, only when present
fn optional_lines(profile: &UserProfile, include_event: bool) -> Vec<(&'static str, &str)> {
    let mut lines = Vec::new();
    if include_event {
        if let Some(event) = present(profile.upcoming_event.as_ref()) {
            lines.push(("Upcoming Event", event));
        }
    }
    if let Some(sports) = present(profile.sports_interest.as_ref()) {
        lines.push(("Sports Interests", sports));
    }
    if let Some(issues) = present(profile.past_fitness_issues.as_ref()) {
        lines.push(("Past Fitness Issues", issues));
    }
    lines
}

/// Profile summary lines for the prompt
pub fn profile_sections(profile: &UserProfile, metrics: &BmiResult) -> Vec<String> {
    let mut sections = vec![
        format!("- Age: {} years", profile.age),
        format!("- Height: {} cm", profile.height),
        format!(
            "- Current Weight: {} kg | Target Weight: {} kg",
            profile.current_weight, profile.target_weight
        ),
        format!("- BMI: {} ({})", metrics.bmi, metrics.category),
        format!("- Goal: {}", profile.fitness_goal.label()),
        format!("- Dietary Preference: {}", profile.dietary_preference.label()),
        format!("- Sugar Intake: {}", profile.sugar_intake),
        format!("- Water Intake: {} glasses per day", profile.water_intake),
        format!("- Estimated Goal Date: {}", metrics.estimated_goal_date),
    ];

    sections.extend(
        optional_lines(profile, true)
            .into_iter()
            .map(|(label, value)| format!("- {}: {}", label, value)),
    );
    sections
}

/// Build the prompt sent to the text generator
pub fn build_prompt(profile: &UserProfile, metrics: &BmiResult) -> String {
    let mut parts = vec![
        format!(
            "Act as a certified nutritionist. Create a detailed {} diet plan for the following person.",
            profile.dietary_preference.label()
        ),
        String::new(),
        "Profile:".to_string(),
    ];
    parts.extend(profile_sections(profile, metrics));
    parts.push(String::new());
    parts.push("Structure the plan in Markdown using exactly these headings:".to_string());
    parts.extend(PLAN_SECTIONS.iter().map(|s| format!("## {}", s)));
    parts.push(String::new());
    parts.push(
        "Include breakfast, lunch, dinner and snacks for each day of the week, an approximate \
         daily calorie target, and exercise suggestions that fit the person's interests and \
         past issues. Keep the advice practical and safe."
            .to_string(),
    );

    parts.join("\n")
}

/// Build the deterministic plan used when the text generator is unavailable
pub fn fallback_plan(profile: &UserProfile, metrics: &BmiResult) -> String {
    let guidance = calorie_guidance(profile.fitness_goal);

    let mut summary = vec![
        format!("- Age: {}", profile.age),
        format!("- Goal: {}", profile.fitness_goal.label()),
        format!("- Diet: {}", profile.dietary_preference.label()),
        format!("- Sugar Intake: {}", profile.sugar_intake),
        format!("- Water Intake: {} glasses per day", profile.water_intake),
    ];
    summary.extend(
        optional_lines(profile, false)
            .into_iter()
            .map(|(label, value)| format!("- {}: {}", label, value)),
    );

    let mut parts = vec![
        "# Your Personalized Diet Plan".to_string(),
        String::new(),
        "## Profile Summary".to_string(),
    ];
    parts.extend(summary);
    parts.extend([
        String::new(),
        "## Daily Calorie Intake".to_string(),
        format!(
            "- Target: {} calories per day, built around {}.",
            guidance.calories, guidance.focus
        ),
        format!("- Macronutrient split: {}.", guidance.macros),
        String::new(),
        "## Weekly Meal Plan".to_string(),
        format!(
            "Choose {} options for every meal and repeat this pattern through the week:",
            profile.dietary_preference.label()
        ),
        "- Breakfast: a protein source with whole grains and fruit".to_string(),
        "- Lunch: lean protein, a large portion of vegetables and a complex carbohydrate".to_string(),
        "- Snack: nuts, seeds, yogurt or fresh fruit".to_string(),
        "- Dinner: protein with roasted or steamed vegetables".to_string(),
        String::new(),
        "## Exercise Routine".to_string(),
        "- 3-4 days of strength training per week".to_string(),
        "- 2-3 days of moderate cardio for 30 minutes".to_string(),
    ]);
    if let Some(sports) = present(profile.sports_interest.as_ref()) {
        parts.push(format!("- Add sessions of {} on active recovery days", sports));
    }
    if let Some(issues) = present(profile.past_fitness_issues.as_ref()) {
        parts.push(format!(
            "- Progress gradually and adapt movements around: {}",
            issues
        ));
    }
    parts.extend([
        String::new(),
        "## Hydration and Recovery Tips".to_string(),
        format!(
            "- You currently drink {} glasses of water per day; aim for at least 8.",
            profile.water_intake
        ),
        format!(
            "- Your sugar intake is \"{}\"; replace sugary snacks with fruit where you can.",
            profile.sugar_intake
        ),
        "- Sleep 7-9 hours and take at least one full rest day per week.".to_string(),
        String::new(),
        "## Your Goal".to_string(),
        format!(
            "Reach your target weight of {} kg by {}.",
            profile.target_weight, metrics.estimated_goal_date
        ),
    ]);

    parts.join("\n")
}
