//! End-to-end emitter tests: parse a Bic snippet, emit both units, and
//! assert on the exact buffer contents.

use bic_codegen::{generate, Output};

fn emit(source: &str, header_filename: &str) -> Output {
    let program = bic_parser::parse(source).expect("parse should succeed");
    generate(&program, header_filename).expect("emit should succeed")
}

#[test]
fn class_members_default_to_protected() {
    let out = emit(
        "class Point { mut x : int; Point(x : int) { .x = x; } };",
        "point.hpp",
    );
    assert_eq!(
        out.header,
        "#pragma once\n\
         class Point {\n\
         protected: int x;\n\
         protected: Point(int x);\n\
         };\n"
    );
    assert_eq!(
        out.source,
        "#include \"point.hpp\"\n\
         Point::Point(int x) {\n    this->x = x;\n}\n"
    );
}

#[test]
fn explicit_visibility_survives_emission() {
    let out = emit(
        "class Point { priv mut x : int; pub get_x() const -> int { ret x; } }",
        "point.hpp",
    );
    assert_eq!(
        out.header,
        "#pragma once\n\
         class Point {\n\
         private: int x;\n\
         public: [[nodiscard]] int get_x() const;\n\
         };\n"
    );
    assert_eq!(
        out.source,
        "#include \"point.hpp\"\n\
         int Point::get_x() const {\n    return x;\n}\n"
    );
}

#[test]
fn import_lands_in_both_units() {
    let out = emit("import \"util.bic\";", "m.hpp");
    assert_eq!(out.header, "#pragma once\n#include \"util.hpp\"\n");
    assert_eq!(out.source, "#include \"m.hpp\"\n#include \"util.hpp\"\n");
}

#[test]
fn raw_literal_lands_in_source_only() {
    let out = emit("//: #define FOO 1", "m.hpp");
    assert_eq!(out.header, "#pragma once\n");
    assert_eq!(out.source, "#include \"m.hpp\"\n#define FOO 1\n");
}

#[test]
fn raw_literal_in_class_body_lands_in_header() {
    let out = emit("class C {\n//: friend class D;\n}", "c.hpp");
    assert_eq!(
        out.header,
        "#pragma once\nclass C {\n friend class D;\n};\n"
    );
    assert_eq!(out.source, "#include \"c.hpp\"\n");
}

#[test]
fn generic_function_is_defined_in_the_header_only() {
    let out = emit("add<T : type>(a : T, b : T) -> T { ret a + b; }", "add.hpp");
    assert_eq!(
        out.header,
        "#pragma once\n\
         template <typename T> [[nodiscard]] T add(T a, T b) {\n    return a + b;\n}\n"
    );
    assert_eq!(out.source, "#include \"add.hpp\"\n");
}

#[test]
fn enum_is_header_only_with_underlying_type_and_trailing_comma() {
    let out = emit("enum Color : int { Red, Green = 2, Blue };", "color.hpp");
    assert_eq!(
        out.header,
        "#pragma once\n\
         enum class Color : int {\n    Red,\n    Green = 2,\n    Blue,\n};\n"
    );
    assert_eq!(out.source, "#include \"color.hpp\"\n");
}

#[test]
fn nested_class_accumulates_the_qualifier_path() {
    let out = emit(
        "class Outer { class Inner { tick() -> void { } } }",
        "o.hpp",
    );
    assert_eq!(
        out.header,
        "#pragma once\n\
         class Outer {\n\
         class Inner {\n\
         protected: void tick();\n\
         };\n\
         };\n"
    );
    assert_eq!(
        out.source,
        "#include \"o.hpp\"\nvoid Outer::Inner::tick() {\n}\n"
    );
}

#[test]
fn destructor_renders_without_return_type() {
    let out = emit("class Buffer { ~Buffer() { del data; } }", "b.hpp");
    assert_eq!(
        out.header,
        "#pragma once\n\
         class Buffer {\n\
         protected: ~Buffer();\n\
         };\n"
    );
    assert_eq!(
        out.source,
        "#include \"b.hpp\"\nBuffer::~Buffer() {\n    delete data;\n}\n"
    );
}

#[test]
fn operator_member_is_emitted_inline_in_the_header() {
    let out = emit(
        "class Vec2 { pub operator + (other : const Vec2&) const -> Vec2 { ret other; } }",
        "v.hpp",
    );
    assert_eq!(
        out.header,
        "#pragma once\n\
         class Vec2 {\n\
         public: [[nodiscard]] Vec2 operator+(const Vec2& other) const {\n    return other;\n}\n\
         };\n"
    );
    assert_eq!(out.source, "#include \"v.hpp\"\n");
}

#[test]
fn class_with_inheritance_list() {
    let out = emit("class Circle (pub Shape) { }", "c.hpp");
    assert_eq!(
        out.header,
        "#pragma once\nclass Circle : public Shape {\n};\n"
    );
}

#[test]
fn static_member_variable() {
    let out = emit("class Counter { static mut count : int; }", "c.hpp");
    assert_eq!(
        out.header,
        "#pragma once\n\
         class Counter {\n\
         protected: static int count;\n\
         };\n"
    );
}

#[test]
fn translation_is_deterministic() {
    let source = "import \"dep.bic\";\nclass P { mut x : int; }\nmain() -> int { ret 0; }";
    let first = emit(source, "p.hpp");
    let second = emit(source, "p.hpp");
    assert_eq!(first, second);
}
