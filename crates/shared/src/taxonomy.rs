use serde::{Deserialize, Serialize};

/// A single topic in the classification taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicDefinition {
    pub id: String,
    pub keywords: Vec<String>,
    pub weight: f64,
    pub label: String,
}

impl TopicDefinition {
    pub fn new(id: impl Into<String>, weight: f64, label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            id: id.into(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            weight,
            label: label.into(),
        }
    }
}

/// Topic definitions plus the noise keyword list.
///
/// Topics are kept as an ordered list, not a map: the classifier breaks
/// weighted-score ties by configuration order, so iteration order must be
/// stable across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    pub topics: Vec<TopicDefinition>,
    pub noise_keywords: Vec<String>,
}

impl Taxonomy {
    /// Built-in AI/tech digest taxonomy
    pub fn ai_tech() -> Self {
        let topics = vec![
            TopicDefinition::new(
                "llm",
                1.0,
                "Large Language Models",
                &[
                    "llm",
                    "gpt",
                    "claude",
                    "gemini",
                    "openai",
                    "anthropic",
                    "deepseek",
                    "language model",
                    "chatgpt",
                    "transformer",
                    "llama",
                    "mistral",
                    "phi-3",
                    "copilot",
                    "cursor",
                    "coding agent",
                    "ai agent",
                    "agentic",
                ],
            ),
            TopicDefinition::new(
                "ml_research",
                0.9,
                "ML Research",
                &[
                    "neural network",
                    "deep learning",
                    "machine learning",
                    "training",
                    "inference",
                    "model",
                    "benchmark",
                    "fine-tuning",
                    "rlhf",
                    "reasoning",
                    "diffusion",
                    "attention",
                    "embedding",
                    "vector",
                ],
            ),
            TopicDefinition::new(
                "ai_product",
                0.85,
                "AI Products",
                &[
                    "ai-powered",
                    "ai app",
                    "ai startup",
                    "ai tool",
                    "ai api",
                    "generative ai",
                    "ai feature",
                    "ai integration",
                ],
            ),
            TopicDefinition::new(
                "ai_infra",
                0.9,
                "AI Infrastructure",
                &[
                    "gpu",
                    "cuda",
                    "tpu",
                    "nvidia",
                    "h100",
                    "inference server",
                    "model serving",
                    "vllm",
                    "triton",
                    "onnx",
                    "tensorrt",
                ],
            ),
            TopicDefinition::new(
                "ai_ethics",
                0.8,
                "AI Ethics & Safety",
                &[
                    "ai safety",
                    "alignment",
                    "hallucination",
                    "bias",
                    "regulation",
                    "ai policy",
                    "ai governance",
                    "responsible ai",
                ],
            ),
            TopicDefinition::new(
                "developer_tools",
                0.6,
                "Developer Tools",
                &[
                    "developer",
                    "devtools",
                    "ide",
                    "vscode",
                    "programming",
                    "coding",
                    "software engineering",
                    "api",
                    "sdk",
                    "framework",
                    "library",
                ],
            ),
            TopicDefinition::new(
                "tech_industry",
                0.5,
                "Tech Industry",
                &[
                    "startup",
                    "funding",
                    "acquisition",
                    "layoff",
                    "hiring",
                    "tech company",
                    "silicon valley",
                    "yc",
                    "vc",
                    "series a",
                ],
            ),
            TopicDefinition::new(
                "data_engineering",
                0.5,
                "Data Engineering",
                &[
                    "database",
                    "sql",
                    "postgres",
                    "data pipeline",
                    "etl",
                    "data warehouse",
                    "analytics",
                    "bigquery",
                    "snowflake",
                ],
            ),
        ];

        let noise_keywords = [
            "sleep in lax",
            "where to sleep",
            "music club",
            "diy music",
            "linguistics",
            "passive voice",
            "grammar",
            "heating homes",
            "weather satellite",
            "cancer treatment",
            "drug trial",
            "wifi only works",
            "curved things",
            "board games",
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();

        Self {
            topics,
            noise_keywords,
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::ai_tech()
    }
}
