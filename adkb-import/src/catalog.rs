//! Seed catalogs of assessment tools and treatment recommendations
//!
//! These are not part of the knowledge-base document; they ship with the
//! importer and are loaded on every run.

use adkb_common::db::{
    AssessmentTool, EvidenceLevel, PsychometricProperties, RecommendationStrength,
    TreatmentRecommendation, TreatmentType,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn assessment_tools() -> Vec<AssessmentTool> {
    vec![
        AssessmentTool {
            name: "Adult ADHD Self-Report Scale".to_string(),
            acronym: "ASRS".to_string(),
            purpose: "Screening for adult ADHD symptoms".to_string(),
            target_population: "Adults 18+ years".to_string(),
            administration_time: 5,
            domains: strings(&["Inattention", "Hyperactivity", "Impulsivity"]),
            psychometric_properties: PsychometricProperties {
                reliability: "Good internal consistency (α = 0.88)".to_string(),
                validity: "Good sensitivity and specificity for ADHD diagnosis".to_string(),
            },
            clinical_utility: "Brief screening tool suitable for primary care settings".to_string(),
            limitations: strings(&["Self-report bias", "May not capture functional impairment"]),
        },
        AssessmentTool {
            name: "Adult ADHD Quality of Life Scale".to_string(),
            acronym: "AAQoL".to_string(),
            purpose: "Assess quality of life impact of ADHD".to_string(),
            target_population: "Adults with ADHD".to_string(),
            administration_time: 10,
            domains: strings(&[
                "Life productivity",
                "Psychological health",
                "Life outlook",
                "Relationships",
            ]),
            psychometric_properties: PsychometricProperties {
                reliability: "Excellent internal consistency (α = 0.93)".to_string(),
                validity: "Strong construct validity with ADHD symptom measures".to_string(),
            },
            clinical_utility: "Comprehensive assessment of ADHD impact on quality of life"
                .to_string(),
            limitations: strings(&["ADHD-specific", "May not be sensitive to change"]),
        },
    ]
}

pub fn treatment_recommendations() -> Vec<TreatmentRecommendation> {
    vec![
        TreatmentRecommendation {
            condition: "Adult ADHD".to_string(),
            treatment_type: TreatmentType::Pharmacological,
            intervention_name: "Stimulant medications".to_string(),
            evidence_level: EvidenceLevel::Level1A,
            effect_size: 0.5,
            recommendation_strength: RecommendationStrength::StrongFor,
            target_population: "Professional men aged 25-55".to_string(),
            contraindications: strings(&["Cardiovascular disease", "Substance abuse history"]),
            side_effects: strings(&[
                "Appetite suppression",
                "Sleep difficulties",
                "Increased heart rate",
            ]),
            monitoring_requirements: strings(&[
                "Blood pressure",
                "Heart rate",
                "Weight",
                "Sleep patterns",
            ]),
        },
        TreatmentRecommendation {
            condition: "Adult ADHD with comorbid anxiety/depression".to_string(),
            treatment_type: TreatmentType::Psychological,
            intervention_name: "Cognitive Behavioral Therapy".to_string(),
            evidence_level: EvidenceLevel::Level1A,
            effect_size: 4.43,
            recommendation_strength: RecommendationStrength::StrongFor,
            target_population: "Professional men aged 25-55".to_string(),
            contraindications: strings(&["Severe cognitive impairment"]),
            side_effects: strings(&["Temporary increase in anxiety during initial sessions"]),
            monitoring_requirements: strings(&[
                "ADHD symptom scales",
                "Depression measures",
                "Anxiety measures",
            ]),
        },
    ]
}
