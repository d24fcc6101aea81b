pub const ENHANCE: &str = include_str!("../data/prompts/enhance.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single left-to-right pass, so placeholder-looking text
/// inside a value is left alone.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{a}} {{zzz}}", &[("a", "x")]), "x {{zzz}}");
    }

    #[test]
    fn test_render_does_not_expand_values() {
        assert_eq!(
            render("{{a}}/{{b}}", &[("a", "{{b}}"), ("b", "two")]),
            "{{b}}/two"
        );
    }

    #[test]
    fn test_render_unterminated_placeholder() {
        assert_eq!(render("tail {{open", &[("open", "x")]), "tail {{open");
    }

    #[test]
    fn test_enhance_template_has_placeholders() {
        assert!(ENHANCE.contains("{{user_prompt}}"));
        assert!(ENHANCE.contains("{{style}}"));
        assert!(ENHANCE.contains("{{quality}}"));
        assert!(ENHANCE.contains("{{negative_prompt}}"));
        assert!(ENHANCE.contains("Avoid negative concepts."));
    }
}
