/// Collapses every whitespace run to a single space and trims both ends.
/// Code-completion answers are compared in this normalized form.
pub fn normalize_code(code: &str) -> String {
    code.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(
            normalize_code("  def  f(x):\n  return x  "),
            "def f(x): return x"
        );
        assert_eq!(normalize_code("x=1"), "x=1");
        assert_eq!(normalize_code("   "), "");
    }
}
