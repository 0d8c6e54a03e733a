use crate::models::CurationOutput;

/// Render a curated digest as a markdown preview for editorial review
pub fn generate_markdown(output: &CurationOutput) -> String {
    let mut md = String::new();

    let date = output.curated_at.get(..10).unwrap_or(&output.curated_at);

    md.push_str("# AI & Tech Digest Preview\n");
    md.push_str(&format!("*Curated: {}*\n\n", date));
    md.push_str(&format!(
        "**{} stories** curated from {} collected\n\n",
        output.stats.published_items, output.stats.input_items
    ));

    for (theme, items) in &output.themes {
        md.push_str(&format!("## {}\n\n", theme));

        // Top 5 per theme
        for item in items.iter().take(5) {
            let title = item.record.title.as_deref().unwrap_or("Untitled");
            let url = item.record.url.as_deref().unwrap_or("#");

            md.push_str(&format!("### [{}]({})\n", title, url));
            md.push_str(&format!("*{}*\n\n", item.editorial.one_liner));
            md.push_str(&format!(
                "**Why it matters:** {}\n\n",
                item.editorial.why_it_matters
            ));
            md.push_str(&format!("{} points\n\n", item.record.likes()));
        }

        md.push_str("---\n\n");
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CuratorConfig;
    use crate::curator::Curator;
    use crate::models::ContentRecord;
    use chrono::TimeZone;

    fn sample_output() -> CurationOutput {
        let records = vec![ContentRecord {
            title: Some("Benchmarking GPT-4 vs Claude".to_string()),
            url: Some("https://example.com/benchmark".to_string()),
            impressions_likes: Some(350),
            impressions_replies: Some(80),
            published_at: Some("2025-05-30T12:00:00Z".to_string()),
            ..Default::default()
        }];
        let now = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Curator::new(CuratorConfig::default())
            .unwrap()
            .curate_at(&records, Some("hackernews"), now)
    }

    #[test]
    fn test_markdown_contains_story_fields() {
        let md = generate_markdown(&sample_output());

        assert!(md.contains("# AI & Tech Digest Preview"));
        assert!(md.contains("*Curated: 2025-06-01*"));
        assert!(md.contains("**1 stories** curated from 1 collected"));
        assert!(md.contains("## AI & LLMs"));
        assert!(md.contains("### [Benchmarking GPT-4 vs Claude](https://example.com/benchmark)"));
        assert!(md.contains("*Performance/comparison data for large language models*"));
        assert!(md.contains("**Why it matters:**"));
        assert!(md.contains("350 points"));
    }

    #[test]
    fn test_markdown_handles_missing_title_and_url() {
        let mut output = sample_output();
        output.published_items[0].record.title = None;
        output.published_items[0].record.url = None;
        let item = output.published_items[0].clone();
        output.themes.insert("AI & LLMs".to_string(), vec![item]);

        let md = generate_markdown(&output);
        assert!(md.contains("### [Untitled](#)"));
    }

    #[test]
    fn test_markdown_caps_each_theme_at_five() {
        let mut output = sample_output();
        let item = output.themes["AI & LLMs"][0].clone();
        output
            .themes
            .insert("AI & LLMs".to_string(), vec![item; 8]);

        let md = generate_markdown(&output);
        assert_eq!(md.matches("### [").count(), 5);
    }
}
