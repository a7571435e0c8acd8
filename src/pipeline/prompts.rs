//! Queries and LLM prompts for the two extraction flows.
//!
//! The prompts embed the hard constraints the oracle must honor: reject
//! stale dates, never invent distances, prefer official-looking sources,
//! and for results return all-null instead of guessing.

/// Search query for event master data.
pub fn event_query(event_name: &str, year: i32) -> String {
    format!("official date and distances {event_name} {year} race")
}

/// Primary search query for an athlete's result.
pub fn result_query(event_name: &str, year: i32, athlete_name: &str) -> String {
    format!("{event_name} {year} results {athlete_name}")
}

/// Broader fallback query when the primary result search comes up empty.
pub fn result_fallback_query(event_name: &str, year: i32) -> String {
    format!("{event_name} {year} race results pdf")
}

/// Instruction set for event extraction.
pub fn format_event_prompt(event_name: &str, context: &str, current_year: i32) -> String {
    format!(
        r#"You are a sports data analyst. Extract precise master data for the race: {event_name}.

Context gathered from the web:
{context}

RULES TO AVOID ERRORS:
1. DATE: Look for the date of the NEXT edition. Discard dates from editions before {current_year}; only accept dates in {current_year} or later. Output format YYYY-MM-DD.
2. DISTANCES: Look for the course or regulations section. Never invent kilometers. If several distances are offered, list them all.
3. VERIFICATION: If sources contradict each other, prefer the one that looks like the event's official website (its own .com or country domain).
4. SPORT: One of Running, Trail, Cycling, Gravel or Triathlon.
5. REGISTRATION STATUS: Only 'open', 'closed' or 'pending'."#
    )
}

/// Instruction set for result extraction.
pub fn format_result_prompt(
    athlete_name: &str,
    event_name: &str,
    year: i32,
    context: &str,
) -> String {
    format!(
        r#"You are a race results analyst. Find the result of the athlete '{athlete_name}' in the race '{event_name}' ({year}).

Context gathered from the web:
{context}

RULES TO AVOID ERRORS:
1. NAME MATCHING: Accept name variants - surname-first ordering, different casing, missing diacritics.
2. NO GUESSING: If you are not confident the listed athlete is '{athlete_name}', return null for every field. Never attribute another runner's time.
3. TIME: Official chip or gun time as printed, e.g. '3:41:27'.
4. POSITIONS: Overall position and category/age-group position if listed.
5. PACE: Average pace if printed; do not compute it yourself."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_embed_their_parameters() {
        let q = event_query("Madrid Marathon", 2025);
        assert!(q.contains("Madrid Marathon"));
        assert!(q.contains("2025"));

        let q = result_query("Boston Marathon", 2024, "Jane Doe");
        assert!(q.contains("Jane Doe"));
        assert!(q.contains("Boston Marathon"));

        let q = result_fallback_query("Boston Marathon", 2024);
        assert!(q.contains("pdf"));
        assert!(!q.contains("Jane"));
    }

    #[test]
    fn event_prompt_embeds_year_guard_and_context() {
        let prompt = format_event_prompt("Madrid Marathon", "some context", 2025);
        assert!(prompt.contains("before 2025"));
        assert!(prompt.contains("some context"));
        assert!(prompt.contains("Never invent kilometers"));
    }

    #[test]
    fn result_prompt_forbids_guessing() {
        let prompt = format_result_prompt("Jane Doe", "Boston Marathon", 2024, "ctx");
        assert!(prompt.contains("return null for every field"));
        assert!(prompt.contains("surname-first"));
    }
}
