use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::OrchestrationError;

/// Closed set of pipeline phases, declared in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Core System & Learning")]
    CoreSystemAndLearning,
    #[serde(rename = "Ideation & Planning")]
    IdeationAndPlanning,
    #[serde(rename = "Research & Structuring")]
    ResearchAndStructuring,
    #[serde(rename = "SEO & Keyword Preparation")]
    SeoAndKeywordPreparation,
    #[serde(rename = "Drafting & Content Generation")]
    DraftingAndContentGeneration,
    #[serde(rename = "Content Enrichment")]
    ContentEnrichment,
    #[serde(rename = "SEO Optimization & Linking")]
    SeoOptimizationAndLinking,
    #[serde(rename = "Editing & Validation")]
    EditingAndValidation,
    #[serde(rename = "Plagiarism Check")]
    PlagiarismCheck,
    #[serde(rename = "Ads & Monetization")]
    AdsAndMonetization,
    #[serde(rename = "Scheduling & Publishing")]
    SchedulingAndPublishing,
    #[serde(rename = "Promotion")]
    Promotion,
    #[serde(rename = "Analytics & Update")]
    AnalyticsAndUpdate,
    #[serde(rename = "Chatbot & Feedback")]
    ChatbotAndFeedback,
    #[serde(rename = "Quality Assurance & Compliance")]
    QualityAssuranceAndCompliance,
    #[serde(rename = "Content Acquisition & Cloning")]
    ContentAcquisitionAndCloning,
    #[serde(rename = "Safety, Security & Monitoring")]
    SafetySecurityAndMonitoring,
    #[serde(rename = "Editorial Management & Collaboration")]
    EditorialManagementAndCollaboration,
    #[serde(rename = "Auxiliary/Support")]
    AuxiliarySupport,
}

impl Phase {
    pub const ALL: [Phase; 19] = [
        Phase::CoreSystemAndLearning,
        Phase::IdeationAndPlanning,
        Phase::ResearchAndStructuring,
        Phase::SeoAndKeywordPreparation,
        Phase::DraftingAndContentGeneration,
        Phase::ContentEnrichment,
        Phase::SeoOptimizationAndLinking,
        Phase::EditingAndValidation,
        Phase::PlagiarismCheck,
        Phase::AdsAndMonetization,
        Phase::SchedulingAndPublishing,
        Phase::Promotion,
        Phase::AnalyticsAndUpdate,
        Phase::ChatbotAndFeedback,
        Phase::QualityAssuranceAndCompliance,
        Phase::ContentAcquisitionAndCloning,
        Phase::SafetySecurityAndMonitoring,
        Phase::EditorialManagementAndCollaboration,
        Phase::AuxiliarySupport,
    ];

    /// Phases run by a full blog creation, in order.
    ///
    /// Core System & Learning is only run on request.
    pub fn default_sequence() -> &'static [Phase] {
        &Self::ALL[1..]
    }

    /// Human-readable name, used as the `phase_results` key
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CoreSystemAndLearning => "Core System & Learning",
            Self::IdeationAndPlanning => "Ideation & Planning",
            Self::ResearchAndStructuring => "Research & Structuring",
            Self::SeoAndKeywordPreparation => "SEO & Keyword Preparation",
            Self::DraftingAndContentGeneration => "Drafting & Content Generation",
            Self::ContentEnrichment => "Content Enrichment",
            Self::SeoOptimizationAndLinking => "SEO Optimization & Linking",
            Self::EditingAndValidation => "Editing & Validation",
            Self::PlagiarismCheck => "Plagiarism Check",
            Self::AdsAndMonetization => "Ads & Monetization",
            Self::SchedulingAndPublishing => "Scheduling & Publishing",
            Self::Promotion => "Promotion",
            Self::AnalyticsAndUpdate => "Analytics & Update",
            Self::ChatbotAndFeedback => "Chatbot & Feedback",
            Self::QualityAssuranceAndCompliance => "Quality Assurance & Compliance",
            Self::ContentAcquisitionAndCloning => "Content Acquisition & Cloning",
            Self::SafetySecurityAndMonitoring => "Safety, Security & Monitoring",
            Self::EditorialManagementAndCollaboration => "Editorial Management & Collaboration",
            Self::AuxiliarySupport => "Auxiliary/Support",
        }
    }

    /// Identifier-safe key accepted on the command line and in configuration
    pub fn key(&self) -> &'static str {
        match self {
            Self::CoreSystemAndLearning => "core_system_and_learning",
            Self::IdeationAndPlanning => "ideation_and_planning",
            Self::ResearchAndStructuring => "research_and_structuring",
            Self::SeoAndKeywordPreparation => "seo_and_keyword_preparation",
            Self::DraftingAndContentGeneration => "drafting_and_content_generation",
            Self::ContentEnrichment => "content_enrichment",
            Self::SeoOptimizationAndLinking => "seo_optimization_and_linking",
            Self::EditingAndValidation => "editing_and_validation",
            Self::PlagiarismCheck => "plagiarism_check",
            Self::AdsAndMonetization => "ads_and_monetization",
            Self::SchedulingAndPublishing => "scheduling_and_publishing",
            Self::Promotion => "promotion",
            Self::AnalyticsAndUpdate => "analytics_and_update",
            Self::ChatbotAndFeedback => "chatbot_and_feedback",
            Self::QualityAssuranceAndCompliance => "quality_assurance_and_compliance",
            Self::ContentAcquisitionAndCloning => "content_acquisition_and_cloning",
            Self::SafetySecurityAndMonitoring => "safety_security_and_monitoring",
            Self::EditorialManagementAndCollaboration => "editorial_management_and_collaboration",
            Self::AuxiliarySupport => "auxiliary_support",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Phase {
    type Err = OrchestrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|phase| {
                phase.display_name().eq_ignore_ascii_case(trimmed) || phase.key() == trimmed
            })
            .ok_or_else(|| OrchestrationError::UnknownPhase(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_key_round_trip_through_from_str() {
        for phase in Phase::ALL {
            assert_eq!(phase.display_name().parse::<Phase>().unwrap(), phase);
            assert_eq!(phase.key().parse::<Phase>().unwrap(), phase);
        }
    }

    #[test]
    fn test_display_name_match_ignores_case() {
        let phase: Phase = "Drafting & Content generation".parse().unwrap();
        assert_eq!(phase, Phase::DraftingAndContentGeneration);
    }

    #[test]
    fn test_unknown_phase_is_rejected() {
        let error = "Publishing Preparation".parse::<Phase>().unwrap_err();
        assert_eq!(
            error,
            OrchestrationError::UnknownPhase("Publishing Preparation".to_string())
        );
    }

    #[test]
    fn test_default_sequence_skips_core_system() {
        let sequence = Phase::default_sequence();
        assert_eq!(sequence.len(), 18);
        assert_eq!(sequence[0], Phase::IdeationAndPlanning);
        assert_eq!(sequence[17], Phase::AuxiliarySupport);
        assert!(!sequence.contains(&Phase::CoreSystemAndLearning));
        assert!(sequence.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_serializes_as_display_name() {
        let json = serde_json::to_string(&Phase::SafetySecurityAndMonitoring).unwrap();
        assert_eq!(json, "\"Safety, Security & Monitoring\"");
    }
}
