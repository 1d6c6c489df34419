/// Inverts the case of every cased letter; everything else is kept.
pub fn swap_case(text: &str) -> String {
    let mut swapped = String::with_capacity(text.len());

    for c in text.chars() {
        if c.is_lowercase() {
            swapped.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            swapped.extend(c.to_lowercase());
        } else {
            swapped.push(c);
        }
    }

    swapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::default_samples;

    #[test]
    fn test_swap_case_mixed_scripts() {
        assert_eq!(swap_case("Привет, Мир! (encoding: utf-8)"), "пРИВЕТ, мИР! (ENCODING: UTF-8)");
        assert_eq!(swap_case("123 -_!"), "123 -_!");
        assert_eq!(swap_case(""), "");
    }

    #[test]
    fn test_swap_case_is_an_involution() {
        let mut texts: Vec<String> = default_samples().into_iter().map(|s| s.text).collect();
        texts.push("MiXeD cAsE ÄöÜ Ωμέγα".to_string());

        for text in texts {
            assert_eq!(swap_case(&swap_case(&text)), text);
        }
    }
}
