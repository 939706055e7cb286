/// Turn a type-style agent key into a display name.
///
/// Runs of capitals are kept together as acronyms, so `SEORoadmappingAgent`
/// becomes `SEO Roadmapping Agent`.
pub fn display_name(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut name = String::with_capacity(key.len() + 8);

    for (index, &current) in chars.iter().enumerate() {
        if index > 0 && current.is_uppercase() {
            let previous = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());

            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lower)
            {
                name.push(' ');
            }
        }
        name.push(current);
    }

    name
}
