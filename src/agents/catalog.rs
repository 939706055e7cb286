//! Built-in agent keys, grouped by phase in declaration order.

use crate::orchestration::Phase;

const CORE_SYSTEM_AND_LEARNING: &[&str] = &["SelfLearningSuperviserAgent", "BrainstormingAgent"];

const IDEATION_AND_PLANNING: &[&str] = &[
    "BrandAlignmentAgent",
    "AudienceAnalysisAgent",
    "AudiencePersonaAgent",
    "AudienceSentimentAgent",
    "CompetitorAnalysisAgent",
    "ContextGatheringAgent",
    "ContextHistoryAgent",
    "EthicalBiasAgent",
    "FinalTopicSelectionAgent",
    "GoalDefinitionAgent",
    "NicheAuthorityAgent",
    "RegulatoryLandscapeAgent",
    "SemanticGapAgent",
    "TopicGenerationAgent",
    "TopicListMonitoringAgent",
    "TopicUniquenessValidationAgent",
    "TopicValidationAgent",
];

const RESEARCH_AND_STRUCTURING: &[&str] = &[
    "LiteratureContentGapCheckerAgent",
    "OutlineStructuringAgent",
    "ReferenceValidationAgent",
    "ResearchAgent",
    "ResearchHarvestingAgent",
    "SourceCredibilityAgent",
    "SourceReliabilityAgent",
    "SourceReliabilityScoringAgent",
    "SourceReliabilityValidationAgent",
];

const SEO_AND_KEYWORD_PREPARATION: &[&str] = &[
    "KeywordClusteringAgent",
    "KeywordExtractionAgent",
    "KeywordIntegrationPlanningAgent",
    "SemanticSEOIntegrationAgent",
    "SEORoadmappingAgent",
    "VoiceSearchOptimizationAgent",
];

const DRAFTING_AND_CONTENT_GENERATION: &[&str] = &[
    "DataQuoteInsertionAgent",
    "DraftIntroductionAgent",
    "ExampleStoryIntegrationAgent",
    "MetaDescriptionSnippetAgent",
    "MetaSnippetGeneratorAgent",
    "ScalingCloningAgent",
    "SectionBodyWriterAgent",
    "SectionWritingAgent",
    "SnippetGeneratorAgent",
    "TitleGenerationAgent",
];

const CONTENT_ENRICHMENT: &[&str] = &[
    "ContentSensitivityModerationAgent",
    "DataStatInsertionAgent",
    "DynamicExampleInserterAgent",
    "ImageGenerationAgent",
    "ImagePromptingAgent",
    "ImageResizerAgent",
    "ImageResizingOptimizationAgent",
    "ImageRightsAgent",
    "ImageRightsVerificationAgent",
    "InteractiveContentEmbedderAgent",
    "MultimediaEmbedAgent",
    "PollPopupSuggestionAgent",
    "QuoteCurationAgent",
    "StatInjectorAgent",
];

const SEO_OPTIMIZATION_AND_LINKING: &[&str] = &[
    "BacklinkHealthLinkRotMonitorAgent",
    "BacklinkMonitorAgent",
    "BacklinkPlacementAgent",
    "BacklinkQualityTrackerAgent",
    "BrokenLinkRedirectMonitorAgent",
    "CallToActionWriterAgent",
    "InternalExternalLinkingAgent",
    "KeywordPlacementAgent",
    "MetaDataCompletionAgent",
    "MetaDescriptionAgent",
    "RankingMonitorAgent",
    "RichSnippetSchemaMarkupGeneratorAgent",
    "SchemaMarkupAgent",
    "SchemaMarkupGeneratorAgent",
    "SubheadingAgent",
];

const EDITING_AND_VALIDATION: &[&str] = &[
    "ClarityReadabilityAgent",
    "FormattingAgent",
    "GrammarCheckerAgent",
    "HumanReviewTriggerAgent",
    "ParaphraseAgent",
    "ReadabilityClarityAgent",
    "SpellingPunctuationAgent",
    "StyleGuideComplianceAgent",
    "VisualPreviewAgent",
];

const PLAGIARISM_CHECK: &[&str] = &[
    "AIHallucinationDetectionAgent",
    "ContentHallucinationDetectionAgent",
    "DeepFactReferenceCrossValidationAgent",
    "FinalOriginalityValidatorAgent",
    "OriginalityCheckPlagiarismDetectionAgent",
    "ParaphraseCorrectionAgent",
    "PlagiarismDetectionAgent",
    "PlagiarismParaphraseAgent",
    "PostPublishHallucinationRecheckAgent",
];

const ADS_AND_MONETIZATION: &[&str] = &[
    "AdPlacementAgent",
    "AdResponseMonitorAgent",
    "AdScriptIntegrationAgent",
    "ContentMonetizationStrategyAgent",
];

const SCHEDULING_AND_PUBLISHING: &[&str] = &[
    "SchedulingAgent",
    "CMSUploadAgent",
    "ScheduledPostingAgent",
    "PublishTimingAgent",
    "PublishTimingConflictAgent",
    "PublicationConfirmationAgent",
    "FormattingPreviewAgent",
    "FinalReviewApprovalAgent",
];

const PROMOTION: &[&str] = &[
    "SocialMediaGeneratorAgent",
    "PromotionGenerationAgent",
    "PromotionSchedulerAgent",
    "NewsletterContentGeneratorAgent",
];

const ANALYTICS_AND_UPDATE: &[&str] = &[
    "AnalyticsAgent",
    "BlogPerformanceMonitoringAgent",
    "ContentRelevanceDriftDetectorAgent",
    "ContentUpdateRecommendationAgent",
    "EngagementAnalyticsAgent",
    "HistoricalSEOImpactAnalyzerAgent",
    "PublishingReportAgent",
    "SEOPerformanceTrackerAgent",
    "UpdateRewriteSuggestionAgent",
    "UpdateSuggestionAgent",
];

const CHATBOT_AND_FEEDBACK: &[&str] = &[
    "ChatbotAgent",
    "FeedbackAnalysisAgent",
    "FeedbackModerationAgent",
    "FeedbackIterationAgent",
    "ChatbotAnalyticsAgent",
    "FeedbackPopupAgent",
    "PollCommentAgent",
    "ReviewCollectionAgent",
];

const QUALITY_ASSURANCE_AND_COMPLIANCE: &[&str] = &[
    "HumanInTheLoopReviewAgent",
    "AccessibilityComplianceAgent",
    "AccessibilityReviewAgent",
    "BiasInclusiveLanguageAgent",
    "ComplianceAgent",
    "ComplianceSnapshotAgent",
    "PrivacyDataMinimizationAgent",
    "RegulatoryComplianceAgent",
    "RegulatoryComplianceDuplicateAgent",
];

const CONTENT_ACQUISITION_AND_CLONING: &[&str] = &[
    "ContentParsingSegmentationAgent",
    "ContentRewritingParaphrasingAgent",
    "URLContentExtractionAgent",
];

const SAFETY_SECURITY_AND_MONITORING: &[&str] = &[
    "SecurityReviewAgent",
    "BrokenMediaAssetRecoveryAgent",
    "ContentTamperDetectionAgent",
    "InternalCrawlabilityIndexationTesterAgent",
    "LivePostHealthAgent",
    "NegativeSEOMaliciousSpamDetectionAgent",
    "SearchEngineAlgorithmChangeMonitorAgent",
    "TamperDetectionAgent",
    "TrafficSpikeAnomalyResponseAgent",
    "UserSessionJourneyAnalysisAgent",
];

const EDITORIAL_MANAGEMENT_AND_COLLABORATION: &[&str] = &[
    "ChangeSuggestionAggregatorAgent",
    "EditorialWorkflowAgent",
    "PeerReviewCollaborativeEditingAgent",
];

const AUXILIARY_SUPPORT: &[&str] = &[
    "TagFixingAgent",
    "TableChartGeneratorAgent",
    "IncrementalFunctionAgent",
    "LocalizationAgent",
    "SentimentAnalysisAgent",
    "SemanticConsistencyValidatorAgent",
    "UXJourneySimulatorAgent",
    "ContentGapCheckerAgent",
    "ContentIncrementAgent",
    "ContentLocalizationCulturalAdaptationAgent",
    "FactUpdaterAgent",
    "IncrementFunctionAgent",
    "SocialProofCollectorAgent",
    "TableGeneratorAgent",
    "TableFormatterAgent",
    "TagCheckerAgent",
];

/// Keys of the built-in agents of `phase`, in the order they run
pub fn agent_keys(phase: Phase) -> &'static [&'static str] {
    match phase {
        Phase::CoreSystemAndLearning => CORE_SYSTEM_AND_LEARNING,
        Phase::IdeationAndPlanning => IDEATION_AND_PLANNING,
        Phase::ResearchAndStructuring => RESEARCH_AND_STRUCTURING,
        Phase::SeoAndKeywordPreparation => SEO_AND_KEYWORD_PREPARATION,
        Phase::DraftingAndContentGeneration => DRAFTING_AND_CONTENT_GENERATION,
        Phase::ContentEnrichment => CONTENT_ENRICHMENT,
        Phase::SeoOptimizationAndLinking => SEO_OPTIMIZATION_AND_LINKING,
        Phase::EditingAndValidation => EDITING_AND_VALIDATION,
        Phase::PlagiarismCheck => PLAGIARISM_CHECK,
        Phase::AdsAndMonetization => ADS_AND_MONETIZATION,
        Phase::SchedulingAndPublishing => SCHEDULING_AND_PUBLISHING,
        Phase::Promotion => PROMOTION,
        Phase::AnalyticsAndUpdate => ANALYTICS_AND_UPDATE,
        Phase::ChatbotAndFeedback => CHATBOT_AND_FEEDBACK,
        Phase::QualityAssuranceAndCompliance => QUALITY_ASSURANCE_AND_COMPLIANCE,
        Phase::ContentAcquisitionAndCloning => CONTENT_ACQUISITION_AND_CLONING,
        Phase::SafetySecurityAndMonitoring => SAFETY_SECURITY_AND_MONITORING,
        Phase::EditorialManagementAndCollaboration => EDITORIAL_MANAGEMENT_AND_COLLABORATION,
        Phase::AuxiliarySupport => AUXILIARY_SUPPORT,
    }
}

pub fn total_agents() -> usize {
    Phase::ALL.iter().map(|phase| agent_keys(*phase).len()).sum()
}
