// Printing a parsed tree and parsing it again must give the same tree
use enableinfo::*;
use pretty_assertions::assert_eq;

const SOURCES: &[&str] = &[
    "true",
    "FALSE",
    "42",
    "\"RGBMode\"",
    "PSHOP_ImageMode",
    "true && false || !true",
    "a || b && c || d",
    "1 + 2 * 3 - 4 / 2 == 3",
    "(1 + 2) * (3 - 4)",
    "-PSHOP_ImageWidth < --3",
    "+1 >= -+-1",
    "!!(PSHOP_ImageDepth != 8)",
    "in(PSHOP_ImageMode, \"RGBMode\", \"CMYKMode\") && PSHOP_ImageDepth == 8",
    "min(PSHOP_ImageWidth, PSHOP_ImageHeight, 4096) >= max(1, 2)",
    "dim(PSHOP_HasSelectionMask, !PSHOP_IsTargetComposite)",
    "foo()",
    "PSHOP_NoSuchVar == 1 || PSHOP_ImageWidth / 0 == 1",
    "in (PSHOP_ImageMode, RGBMode, GrayScaleMode)",
];

fn snapshots() -> Vec<EnableInfoVariables> {
    vec![
        EnableInfoVariables::new(0, 0, ImageMode::Bitmap, false, 1, 1, false, false),
        EnableInfoVariables::new(640, 480, ImageMode::RGB, true, 4, 3, true, true),
        EnableInfoVariables::new(4096, 2, ImageMode::CMYK, false, 4, 4, false, false),
        EnableInfoVariables::new(17, 9000, ImageMode::RGB48, true, 3, 3, true, false),
    ]
}

#[test]
fn test_reparse_gives_equal_tree() {
    for src in SOURCES {
        let first = parse(src).unwrap();
        let printed = first.to_string();
        let second = parse(&printed).unwrap_or_else(|e| panic!("{printed:?}: {e}"));
        assert_eq!(first, second, "{src}");
    }
}

#[test]
fn test_reparse_evaluates_identically() {
    for src in SOURCES {
        let first = parse(src).unwrap();
        let second = parse(&first.to_string()).unwrap();
        for vars in snapshots() {
            assert_eq!(evaluate(&first, &vars), evaluate(&second, &vars), "{src}");
        }
    }
}

#[test]
fn test_printing_is_stable() {
    for src in SOURCES {
        let once = parse(src).unwrap().to_string();
        let twice = parse(&once).unwrap().to_string();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_printed_form() {
    assert_eq!(
        parse("1+2*3==7&&!x").unwrap().to_string(),
        "(((1 + (2 * 3)) == 7) && (!x))"
    );
    assert_eq!(
        parse("IN( a ,\"b\" )").unwrap().to_string(),
        "IN(a, \"b\")"
    );
}

#[test]
fn test_hand_built_negative_constants_evaluate_identically() {
    let vars = snapshots().remove(1);
    for n in [-1, -2_000_000, i32::MIN] {
        let expr = Expression::binary(
            BinaryOp::Equal,
            Expression::constant(n),
            Expression::constant(n),
        );
        let reparsed = parse(&expr.to_string()).unwrap();
        assert_eq!(evaluate(&expr, &vars), evaluate(&reparsed, &vars));
        assert_eq!(
            reparsed.eval(&vars).unwrap(),
            Constant::Boolean(true),
            "{expr}"
        );
    }
}
