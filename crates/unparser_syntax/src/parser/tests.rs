#[cfg(test)]
/// Parser unit tests.
///
/// These tests pin the tree shapes of each supported construct and the parser's error recovery behavior.
mod tests {
    use super::*;
    use crate::sexp::read_sexp;

    fn tree(source: &str) -> Node {
        parse(source)
            .unwrap_or_else(|errs| panic!("failed to parse {source:?}: {errs:?}"))
            .unwrap_or_else(|| panic!("no statements in {source:?}"))
    }

    #[track_caller]
    fn assert_parses_to(source: &str, expected: &str) {
        let expected = read_sexp(expected).unwrap();
        let actual = tree(source);
        assert_eq!(actual, expected, "\nsource: {source:?}\nactual: {actual}\nexpected: {expected}");
    }

    // ========================================================================
    // Statements and locals
    // ========================================================================

    #[test]
    fn test_empty_file_has_no_tree() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("# only a comment\n\n;").unwrap(), None);
    }

    #[test]
    fn test_several_statements_become_begin() {
        assert_parses_to("a = 1; a", "(begin (lvasgn :a (int 1)) (lvar :a))");
        assert_parses_to("1\n\n2\n", "(begin (int 1) (int 2))");
    }

    #[test]
    fn test_unassigned_identifier_is_a_call() {
        assert_parses_to("a", "(send nil :a)");
    }

    #[test]
    fn test_module_body_has_its_own_scope() {
        assert_parses_to(
            "module A\n  x = 1\nend\nx",
            "(begin (module (const nil :A) (lvasgn :x (int 1))) (send nil :x))",
        );
    }

    #[test]
    fn test_interpolation_shares_the_enclosing_scope() {
        assert_parses_to(r##"a = 1; "#{a}""##, "(begin (lvasgn :a (int 1)) (dstr (begin (lvar :a))))");
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    #[test]
    fn test_variable_assignments() {
        assert_parses_to("@a = 1", "(ivasgn :@a (int 1))");
        assert_parses_to("@@a = 1", "(cvasgn :@@a (int 1))");
        assert_parses_to("$a = 1", "(gvasgn :$a (int 1))");
        assert_parses_to("a = b = 1", "(lvasgn :a (lvasgn :b (int 1)))");
    }

    #[test]
    fn test_constant_assignment() {
        assert_parses_to("Foo = 1", "(casgn nil :Foo (int 1))");
        assert_parses_to("Foo::Bar = 1", "(casgn (const nil :Foo) :Bar (int 1))");
        assert_parses_to("::Foo = 1", "(casgn (cbase) :Foo (int 1))");
    }

    #[test]
    fn test_setter_and_index_assignment() {
        assert_parses_to("a.b = 1", "(send (send nil :a) :b= (int 1))");
        assert_parses_to("self.b = 1", "(send (self) :b= (int 1))");
        assert_parses_to("a[1] = 2", "(send (send nil :a) :[]= (int 1) (int 2))");
    }

    #[test]
    fn test_assigning_to_a_literal_is_an_error() {
        let errors = parse("1 = 2").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("cannot assign"), "got: {}", errors[0].message);
    }

    #[test]
    fn test_assigning_to_a_call_with_arguments_is_an_error() {
        let errors = parse("a.b(1) = 2").unwrap_err();
        assert!(errors[0].message.contains("cannot assign"), "got: {}", errors[0].message);
    }

    // ========================================================================
    // Calls
    // ========================================================================

    #[test]
    fn test_call_forms() {
        assert_parses_to("foo(1, 2)", "(send nil :foo (int 1) (int 2))");
        assert_parses_to("foo 1, 2", "(send nil :foo (int 1) (int 2))");
        assert_parses_to("foo()", "(send nil :foo)");
        assert_parses_to("a.b.c", "(send (send (send nil :a) :b) :c)");
        assert_parses_to("a.b 1", "(send (send nil :a) :b (int 1))");
        assert_parses_to("Foo::bar", "(send (const nil :Foo) :bar)");
    }

    #[test]
    fn test_operator_methods_called_with_dot() {
        assert_parses_to("a.+(1)", "(send (send nil :a) :+ (int 1))");
        assert_parses_to("a.[](1)", "(send (send nil :a) :[] (int 1))");
        assert_parses_to("a[1, 2]", "(send (send nil :a) :[] (int 1) (int 2))");
    }

    #[test]
    fn test_predicate_and_bang_methods() {
        assert_parses_to("a.empty?", "(send (send nil :a) :empty?)");
        assert_parses_to("save!", "(send nil :save!)");
    }

    // ========================================================================
    // Literals
    // ========================================================================

    #[test]
    fn test_primitives() {
        assert_parses_to("42", "(int 42)");
        assert_parses_to("-3", "(int -3)");
        assert_parses_to("1.5", "(float 1.5)");
        assert_parses_to(":foo", "(sym :foo)");
        assert_parses_to("nil; true; false; self", "(begin (nil) (true) (false) (self))");
        assert_parses_to("@a; @@b; $c", "(begin (ivar :@a) (cvar :@@b) (gvar :$c))");
    }

    #[test]
    fn test_strings() {
        assert_parses_to(r#""""#, r#"(str "")"#);
        assert_parses_to(r#""a\tb""#, r#"(str "a\tb")"#);
        assert_parses_to("'a\\n'", r#"(str "a\\n")"#);
    }

    #[test]
    fn test_interpolated_strings() {
        assert_parses_to(r#""a#{b}c""#, r#"(dstr (str "a") (begin (send nil :b)) (str "c"))"#);
        assert_parses_to(r##""#{}""##, "(dstr (begin))");
        assert_parses_to(r##""#{a; b}""##, "(dstr (begin (send nil :a) (send nil :b)))");
    }

    #[test]
    fn test_adjacent_strings_are_flattened() {
        assert_parses_to(r#""a" "b""#, r#"(dstr (str "a") (str "b"))"#);
        assert_parses_to(r##""a" "" "#{b}""##, r#"(dstr (str "a") (str "") (begin (send nil :b)))"#);
    }

    #[test]
    fn test_xstr() {
        assert_parses_to("`ls #{dir}`", r#"(xstr (str "ls ") (begin (send nil :dir)))"#);
        assert_parses_to("``", "(xstr)");
    }

    #[test]
    fn test_regexps() {
        assert_parses_to("/a+/", r#"(regexp (str "a+") (regopt))"#);
        assert_parses_to("/a/xmix", r#"(regexp (str "a") (regopt :i :m :x))"#);
        assert_parses_to(r"/a\/b/", r#"(regexp (str "a\\/b") (regopt))"#);
        assert_parses_to("%r{a/b}i", r#"(regexp (str "a/b") (regopt :i))"#);
        assert_parses_to("/#{a}b/", r#"(regexp (begin (send nil :a)) (str "b") (regopt))"#);
    }

    #[test]
    fn test_regexp_location_keeps_its_delimiters() {
        let node = tree("%r{a}");
        let location = node.location().unwrap();
        assert_eq!(location.begin_source(), Some("%r{"));
        assert_eq!(location.end_source(), Some("}"));
        assert_eq!(location.expression_source(), "%r{a}");
    }

    #[test]
    fn test_collections() {
        assert_parses_to("[]", "(array)");
        assert_parses_to("[1, [2]]", "(array (int 1) (array (int 2)))");
        assert_parses_to("[\n  1,\n  2,\n]", "(array (int 1) (int 2))");
        assert_parses_to("{}", "(hash)");
        assert_parses_to(
            r#"{ :a => 1, "b" => 2 }"#,
            r#"(hash (pair (sym :a) (int 1)) (pair (str "b") (int 2)))"#,
        );
    }

    // ========================================================================
    // Structure
    // ========================================================================

    #[test]
    fn test_module_and_class() {
        assert_parses_to("module Foo\nend", "(module (const nil :Foo) nil)");
        assert_parses_to("module Foo::Bar; end", "(module (const (const nil :Foo) :Bar) nil)");
        assert_parses_to(
            "class Foo < Bar\n  @a = 1\n  @b = 2\nend",
            "(class (const nil :Foo) (const nil :Bar) (begin (ivasgn :@a (int 1)) (ivasgn :@b (int 2))))",
        );
        assert_parses_to("class Foo\n  1\nend", "(class (const nil :Foo) nil (int 1))");
    }

    #[test]
    fn test_module_location_has_keyword_delimiters() {
        let node = tree("module Foo\nend");
        let location = node.location().unwrap();
        assert_eq!(location.begin_source(), Some("module"));
        assert_eq!(location.end_source(), Some("end"));
    }

    #[test]
    fn test_module_name_must_be_a_constant() {
        assert!(parse("module foo\nend").is_err());
    }

    #[test]
    fn test_groupings() {
        assert_parses_to("()", "(begin)");
        assert_parses_to("(1)", "(begin (int 1))");
        assert_parses_to("(1; 2)", "(begin (int 1) (int 2))");
        assert_parses_to("begin\n  1\n  2\nend", "(kwbegin (int 1) (int 2))");
        assert_parses_to("begin; end", "(kwbegin)");
    }

    #[test]
    fn test_constants() {
        assert_parses_to("Foo", "(const nil :Foo)");
        assert_parses_to("Foo::Bar::Baz", "(const (const (const nil :Foo) :Bar) :Baz)");
        assert_parses_to("::Foo", "(const (cbase) :Foo)");
        assert_parses_to("puts ::Foo", "(send nil :puts (const (cbase) :Foo))");
    }

    // ========================================================================
    // Errors and recovery
    // ========================================================================

    #[test]
    fn test_errors_recover_at_statement_boundaries() {
        let errors = parse("x = )\ny = )\nz = 1").unwrap_err();
        assert_eq!(errors.len(), 2, "got: {errors:?}");
        assert!(errors.iter().all(|e| e.kind == crate::diagnostics::ErrorKind::Syntax));
    }

    #[test]
    fn test_missing_end_is_reported() {
        let errors = parse("module Foo\n  1\n").unwrap_err();
        assert!(errors[0].message.contains("`end`"), "got: {}", errors[0].message);
    }

    #[test]
    fn test_unsupported_keyword_is_reported() {
        let errors = parse("if a\nend").unwrap_err();
        assert!(errors[0].message.contains("`if`"), "got: {}", errors[0].message);
    }

    #[test]
    fn test_lexer_errors_are_returned() {
        let errors = parse("\"abc").unwrap_err();
        assert_eq!(errors[0].message, "unterminated literal");
    }

    #[test]
    fn test_parse_tokens_of_empty_stream() {
        assert_eq!(parse_tokens("", &[]).unwrap(), None);
    }
}
