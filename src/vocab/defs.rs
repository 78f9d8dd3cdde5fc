#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiasGroup {
    Content,
    Cognitive,
    Social,
}

#[derive(Debug, Clone, Copy)]
pub struct BiasDef {
    pub id: &'static str,
    pub key: &'static str,
    pub name: &'static str,
    pub group: BiasGroup,
}

pub const LEVEL_LABELS: [&str; 5] = [
    "Level 1 - Minimum Details",
    "Level 2 - Moderate Details",
    "Level 3 - Moderate Listwise Details",
    "Level 4 - Significant Details + User Expectation",
    "Level 5 - Maximum Details",
];

pub const TEMPERATURES: &[&str] = &["0.2", "0.75"];

pub const CATALOG_BIASES: &[BiasDef] = &[
    BiasDef {
        id: "fact",
        key: "factual_content",
        name: "Factual Content",
        group: BiasGroup::Content,
    },
    BiasDef {
        id: "harm",
        key: "harmless_content",
        name: "Harmless Content",
        group: BiasGroup::Content,
    },
    BiasDef {
        id: "fal",
        key: "false_assertion_resistance",
        name: "False Assertion Resistance",
        group: BiasGroup::Content,
    },
    BiasDef {
        id: "anchor",
        key: "anchoring_bias",
        name: "Anchoring Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "av",
        key: "availability_bias",
        name: "Availability Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "confirm",
        key: "confirmation_bias",
        name: "Confirmation Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "fra",
        key: "framing_bias",
        name: "Framing Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "nlp",
        key: "prospect_theory_bias",
        name: "Prospect Theory Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "pol",
        key: "political_bias",
        name: "Political Bias",
        group: BiasGroup::Social,
    },
    BiasDef {
        id: "race",
        key: "racial_bias",
        name: "Racial Bias",
        group: BiasGroup::Social,
    },
    BiasDef {
        id: "relig",
        key: "religious_bias",
        name: "Religious Bias",
        group: BiasGroup::Social,
    },
    BiasDef {
        id: "attr",
        key: "attribution_bias",
        name: "Attribution Bias",
        group: BiasGroup::Social,
    },
];

pub const KEYED_BIASES: &[BiasDef] = &[
    BiasDef {
        id: "anchor",
        key: "anchoring_bias",
        name: "Anchoring Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "av",
        key: "availability_bias",
        name: "Availability Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "confirm",
        key: "confirmation_bias",
        name: "Confirmation Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "fra",
        key: "framing_bias",
        name: "Framing Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "nlp",
        key: "prospect_theory_bias",
        name: "Prospect Theory Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "attr",
        key: "fundamental_attribution_error_bias",
        name: "Fundamental Attribution Error",
        group: BiasGroup::Social,
    },
    BiasDef {
        id: "rep",
        key: "representativeness_bias",
        name: "Representativeness Bias",
        group: BiasGroup::Cognitive,
    },
    BiasDef {
        id: "inter",
        key: "interpretation_bias",
        name: "Interpretation Bias",
        group: BiasGroup::Cognitive,
    },
];
