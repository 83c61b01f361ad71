use indexmap::IndexMap;
use tracing::debug;

use super::element::{Associativity, Element, ElementKind, Method};

fn truth(value: bool) -> f64 {
    if value {
        1.
    } else {
        0.
    }
}

/// Registry of the operators and functions a formula may use, in
/// registration order.
#[derive(Clone, Debug)]
pub struct Factory(IndexMap<String, Element>);

impl Factory {
    /// A factory without any element.
    pub fn empty() -> Self {
        Factory(IndexMap::new())
    }

    /// A factory with every built-in operator and function.
    pub fn new() -> Self {
        use Associativity::{Left, Right};
        use Method::{Binary, Unary};

        let mut factory = Self::empty();

        let operators = [
            ("!", "logical NOT", Unary(|a| truth(a == 0.)), 100, Right),
            ("~", "negation", Unary(|a| -a), 100, Right),
            ("^", "power", Binary(f64::powf), 90, Right),
            ("*", "multiplication", Binary(|a, b| a * b), 80, Left),
            ("/", "division", Binary(|a, b| a / b), 80, Left),
            ("%", "modulo", Binary(|a, b| a % b), 80, Left),
            ("+", "addition", Binary(|a, b| a + b), 70, Left),
            ("-", "subtraction", Binary(|a, b| a - b), 70, Left),
            ("and", "logical AND", Binary(|a, b| truth(a != 0. && b != 0.)), 60, Left),
            ("or", "logical OR", Binary(|a, b| truth(a != 0. || b != 0.)), 50, Left),
        ];

        for (name, description, method, precedence, associativity) in operators {
            factory.register(Element::operator(name, description, method, precedence, associativity));
        }

        let functions: [(&str, &str, Method); 33] = [
            ("gt", "greater than (>)", Binary(|a, b| truth(a > b))),
            ("ge", "greater than or equal to (>=)", Binary(|a, b| truth(a >= b))),
            ("eq", "equal to (==)", Binary(|a, b| truth(a == b))),
            ("neq", "not equal to (!=)", Binary(|a, b| truth(a != b))),
            ("le", "less than or equal to (<=)", Binary(|a, b| truth(a <= b))),
            ("lt", "less than (<)", Binary(|a, b| truth(a < b))),
            ("min", "minimum", Binary(f64::min)),
            ("max", "maximum", Binary(f64::max)),
            ("pow", "power", Binary(f64::powf)),
            ("atan2", "arc tangent of y/x", Binary(f64::atan2)),
            ("fmod", "floating-point remainder", Binary(|a, b| a % b)),
            ("abs", "absolute value", Unary(f64::abs)),
            ("fabs", "absolute value", Unary(f64::abs)),
            ("acos", "arc cosine", Unary(f64::acos)),
            ("asin", "arc sine", Unary(f64::asin)),
            ("atan", "arc tangent", Unary(f64::atan)),
            ("ceil", "ceiling", Unary(f64::ceil)),
            ("cos", "cosine", Unary(f64::cos)),
            ("cosh", "hyperbolic cosine", Unary(f64::cosh)),
            ("exp", "exponential", Unary(f64::exp)),
            ("floor", "floor", Unary(f64::floor)),
            ("log", "natural logarithm", Unary(f64::ln)),
            ("log10", "common logarithm", Unary(f64::log10)),
            ("log1p", "natural logarithm plus one", Unary(f64::ln_1p)),
            ("round", "round", Unary(f64::round)),
            ("sin", "sine", Unary(f64::sin)),
            ("sinh", "hyperbolic sine", Unary(f64::sinh)),
            ("sqrt", "square root", Unary(f64::sqrt)),
            ("tan", "tangent", Unary(f64::tan)),
            ("tanh", "hyperbolic tangent", Unary(f64::tanh)),
            ("acosh", "inverse hyperbolic cosine", Unary(f64::acosh)),
            ("asinh", "inverse hyperbolic sine", Unary(f64::asinh)),
            ("atanh", "inverse hyperbolic tangent", Unary(f64::atanh)),
        ];

        for (name, description, method) in functions {
            factory.register(Element::function(name, description, method));
        }

        factory
    }

    /// Registers `element` under its name, returning the element it replaced.
    pub fn register(&mut self, element: Element) -> Option<Element> {
        let replaced = self.0.insert(element.name.clone(), element);

        if let Some(replaced) = &replaced {
            debug!(name = %replaced.name, kind = ?replaced.kind, "replaced registered element");
        }

        replaced
    }

    pub fn deregister(&mut self, name: &str) -> Option<Element> {
        self.0.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.0.get(name)
    }

    /// An independent copy of the element called `name`.
    pub fn copy(&self, name: &str) -> Option<Element> {
        self.get(name).cloned()
    }

    pub fn operator(&self, name: &str) -> Option<&Element> {
        self.get(name).filter(|element| element.kind == ElementKind::Operator)
    }

    pub fn function(&self, name: &str) -> Option<&Element> {
        self.get(name).filter(|element| element.kind == ElementKind::Function)
    }

    pub fn operators(&self) -> impl Iterator<Item = &Element> {
        self.0.values().filter(|element| element.is_operator())
    }

    pub fn functions(&self) -> impl Iterator<Item = &Element> {
        self.0.values().filter(|element| element.is_function())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_builtins() {
    let factory = Factory::new();

    assert_eq!(factory.operators().count(), 10);
    assert_eq!(factory.functions().count(), 33);
    assert_eq!(
        factory.operators().map(|op| op.name.as_str()).collect::<Vec<_>>(),
        vec!["!", "~", "^", "*", "/", "%", "+", "-", "and", "or"]
    );

    assert!(factory.operator("sin").is_none());
    assert_eq!(factory.function("sin").map(|f| f.arity), Some(1));
    assert_eq!(factory.operator("^").map(|op| op.associativity), Some(Associativity::Right));

    let evaluate = |name: &str, args: &[f64]| factory.get(name).unwrap().evaluate(args).unwrap();

    assert_eq!(evaluate("!", &[0.]), 1.);
    assert_eq!(evaluate("!", &[2.]), 0.);
    assert_eq!(evaluate("%", &[7., 3.]), 1.);
    assert_eq!(evaluate("and", &[1., 0.]), 0.);
    assert_eq!(evaluate("or", &[1., 0.]), 1.);
    assert_eq!(evaluate("ge", &[2., 2.]), 1.);
    assert_eq!(evaluate("lt", &[2., 2.]), 0.);
    assert_eq!(evaluate("max", &[2., 3.]), 3.);
}

#[test]
fn test_register_and_copy() {
    let mut factory = Factory::empty();

    assert!(factory.is_empty());
    assert!(factory
        .register(Element::function("twice", "double", Method::Unary(|a| 2. * a)))
        .is_none());
    assert!(factory
        .register(Element::function("twice", "doubled value", Method::Unary(|a| a + a)))
        .is_some());
    assert_eq!(factory.len(), 1);

    let mut copy = factory.copy("twice").unwrap();

    copy.name = "thrice".into();
    assert_eq!(factory.get("twice").unwrap().description, "doubled value");
    assert!(factory.get("thrice").is_none());

    assert!(factory.deregister("twice").is_some());
    assert!(factory.is_empty());
}
