/// Section layout requested for every full recipe.
///
/// Loaded from `recipe_layout.txt` at compile time; `{title}` is replaced with
/// the selected title.
pub const RECIPE_LAYOUT: &str = include_str!("recipe_layout.txt");

/// Normalize optional preference text; blank preferences are dropped.
fn preferences_line(label: &str, preferences: Option<&str>) -> Option<String> {
    preferences
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{label}: {p}"))
}

/// Prompt asking for five distinct, numbered recipe titles.
pub fn build_titles_prompt(ingredients: &str, preferences: Option<&str>) -> String {
    let mut prompt = format!(
        "Create 5 COMPLETELY DIFFERENT and unique recipe titles using these ingredients: {}\n",
        ingredients.trim()
    );
    if let Some(line) = preferences_line("Considering these preferences", preferences) {
        prompt.push_str(&line);
        prompt.push('\n');
    }
    prompt.push_str(
        "Rules for titles:\n\
         - Each must be VERY different from the others\n\
         - Each must use a different cooking method\n\
         - Each should have a different cuisine influence\n\
         - Make them creative and appetizing\n\
         - Number them 1-5, one per line\n\
         - Each title should be 3-7 words long\n",
    );
    prompt
}

/// Prompt asking for the full recipe of `title` in the fixed section layout.
pub fn build_recipe_prompt(title: &str, ingredients: &str, preferences: Option<&str>) -> String {
    let mut prompt = format!(
        "Create a detailed recipe for: {}\nUsing these ingredients: {}\n",
        title,
        ingredients.trim()
    );
    if let Some(line) = preferences_line("Preferences", preferences) {
        prompt.push_str(&line);
        prompt.push('\n');
    }
    prompt.push_str(&RECIPE_LAYOUT.replace("{title}", title));
    prompt
}
