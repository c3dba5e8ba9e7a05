//! Prompt templates for the language-model stages

/// Ask the model to extract structured shopping intent as bare JSON
pub fn understand_query(query: &str) -> String {
    format!(
        r#"Analyze this product research query: "{}"

Extract:
1. Main product(s) being researched
2. User's specific needs/requirements
3. Budget constraints (if mentioned)
4. Use case or purpose

Return as JSON format with keys: product, needs, budget, use_case
Respond with the JSON object only, without markdown code fences or commentary."#,
        query
    )
}

pub fn analyze_data(user_needs: &str, reviews: &str, prices: &str) -> String {
    format!(
        r#"Analyze this product research data:

User Needs: {}

Reviews Data: {}

Prices Data: {}

Provide a comprehensive analysis including:
1. Key pros and cons
2. Price range analysis
3. User sentiment summary
4. Quality indicators
5. Value for money assessment

Format as structured analysis."#,
        user_needs, reviews, prices
    )
}

pub fn generate_recommendations(analysis: &str, user_needs: &str) -> String {
    format!(
        r#"Based on this analysis: {}
And user needs: {}

Generate specific recommendations:
1. Should they buy this product? Why or why not?
2. Best retailer/price point
3. Alternative products to consider
4. Key factors to watch out for
5. Best time to buy (if applicable)

Make it actionable and personalized."#,
        analysis, user_needs
    )
}

pub fn create_comparison(analysis: &str, recommendations: &str) -> String {
    format!(
        r#"Create a structured comparison summary based on:
Analysis: {}
Recommendations: {}

Format as:
## Product Summary
- **Overall Score**: X/10
- **Best For**: [use case]
- **Price Range**: $X - $Y
- **Top Pros**: [list]
- **Main Cons**: [list]
- **Recommendation**: [buy/wait/consider alternatives]

## Quick Decision Matrix
| Criteria | Score | Notes |
|----------|--------|-------|
| Value | X/5 | ... |
| Quality | X/5 | ... |
| Features | X/5 | ... |"#,
        analysis, recommendations
    )
}
