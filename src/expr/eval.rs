// {{{ Copyright (c) Paul R. Tagliamonte <paultag@debian.org>, 2024
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE. }}}

use super::pest::{ExprParser, Rule};
use super::{Context, Error, Value};
use pest::iterators::Pair;
use pest::Parser;

/// Parse and evaluate `expr` against `ctx`.
pub fn evaluate(expr: &str, ctx: &dyn Context) -> Result<Value, Error> {
    let mut pairs =
        ExprParser::parse(Rule::expr, expr).map_err(|e| Error::Parse(e.to_string()))?;
    let expr_pair = pairs.next().ok_or_else(|| Error::Parse("empty expression".into()))?;
    eval_pair(expr_pair, ctx)
}

fn eval_pair(pair: Pair<Rule>, ctx: &dyn Context) -> Result<Value, Error> {
    match pair.as_rule() {
        Rule::expr => eval_pair(first_inner(pair)?, ctx),

        Rule::or_expr => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(next(&mut inner)?, ctx)?;
            while inner.next().is_some() {
                if acc.truthy() {
                    // short-circuit: still consume the operand pair.
                    let _ = next(&mut inner)?;
                    acc = Value::Bool(true);
                    continue;
                }
                let rhs = eval_pair(next(&mut inner)?, ctx)?;
                acc = Value::Bool(rhs.truthy());
            }
            Ok(acc)
        }

        Rule::and_expr => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(next(&mut inner)?, ctx)?;
            while inner.next().is_some() {
                if !acc.truthy() {
                    let _ = next(&mut inner)?;
                    acc = Value::Bool(false);
                    continue;
                }
                let rhs = eval_pair(next(&mut inner)?, ctx)?;
                acc = Value::Bool(rhs.truthy());
            }
            Ok(acc)
        }

        Rule::bit_or_expr => fold_int(pair, ctx, |a, b, _| Ok(a | b)),
        Rule::bit_xor_expr => fold_int(pair, ctx, |a, b, _| Ok(a ^ b)),
        Rule::bit_and_expr => fold_int(pair, ctx, |a, b, _| Ok(a & b)),

        Rule::eq_expr => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(next(&mut inner)?, ctx)?;
            while let Some(op) = inner.next() {
                let rhs = eval_pair(next(&mut inner)?, ctx)?;
                let equal = values_equal(&acc, &rhs);
                acc = Value::Bool(if op.as_str() == "==" { equal } else { !equal });
            }
            Ok(acc)
        }

        Rule::rel_expr => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(next(&mut inner)?, ctx)?;
            while let Some(op) = inner.next() {
                let rhs = eval_pair(next(&mut inner)?, ctx)?;
                let ord = compare_values(&acc, &rhs)?;
                acc = Value::Bool(match op.as_str() {
                    "<" => ord == std::cmp::Ordering::Less,
                    "<=" => ord != std::cmp::Ordering::Greater,
                    ">" => ord == std::cmp::Ordering::Greater,
                    ">=" => ord != std::cmp::Ordering::Less,
                    other => return Err(Error::Eval(format!("unknown relational operator {other}"))),
                });
            }
            Ok(acc)
        }

        Rule::shift_expr => fold_int(pair, ctx, |a, b, op| match op {
            "<<" => Ok(a.checked_shl(b as u32).unwrap_or(0)),
            ">>" => Ok(a.checked_shr(b as u32).unwrap_or(0)),
            other => Err(Error::Eval(format!("unknown shift operator {other}"))),
        }),

        Rule::add_expr => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(next(&mut inner)?, ctx)?;
            while let Some(op) = inner.next() {
                let rhs = eval_pair(next(&mut inner)?, ctx)?;
                acc = match op.as_str() {
                    "+" => add(acc, rhs)?,
                    "-" => numeric_binop(acc, rhs, |a, b| a - b, |a, b| a - b)?,
                    other => return Err(Error::Eval(format!("unknown additive operator {other}"))),
                };
            }
            Ok(acc)
        }

        Rule::mul_expr => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(next(&mut inner)?, ctx)?;
            while let Some(op) = inner.next() {
                let rhs = eval_pair(next(&mut inner)?, ctx)?;
                acc = match op.as_str() {
                    "*" => numeric_binop(acc, rhs, |a, b| a * b, |a, b| a * b)?,
                    "/" => divide(acc, rhs)?,
                    "%" => modulo(acc, rhs)?,
                    other => return Err(Error::Eval(format!("unknown multiplicative operator {other}"))),
                };
            }
            Ok(acc)
        }

        Rule::unary_expr => {
            let mut inner = pair.into_inner();
            let first = next(&mut inner)?;
            if first.as_rule() == Rule::unary_op {
                let op = first.as_str();
                let value = eval_pair(next(&mut inner)?, ctx)?;
                Ok(match op {
                    "!" => Value::Bool(!value.truthy()),
                    "~" => Value::Int(!value
                        .as_i64()
                        .ok_or_else(|| Error::Eval("~ requires an integer".into()))?),
                    "-" => match value {
                        Value::Float(f) => Value::Float(-f),
                        other => Value::Int(-other
                            .as_i64()
                            .ok_or_else(|| Error::Eval("unary - requires a number".into()))?),
                    },
                    "+" => value,
                    other => return Err(Error::Eval(format!("unknown unary operator {other}"))),
                })
            } else {
                eval_pair(first, ctx)
            }
        }

        Rule::primary => eval_pair(first_inner(pair)?, ctx),

        Rule::function_call => eval_function_call(pair, ctx),

        Rule::identifier => Err(Error::Eval(format!(
            "undefined identifier {:?}",
            pair.as_str()
        ))),

        Rule::integer => {
            let text = pair.as_str();
            let value = if let Some(hex) = text.strip_prefix("0x") {
                i64::from_str_radix(hex, 16)
                    .map_err(|e| Error::Eval(format!("bad integer literal {text:?}: {e}")))?
            } else {
                text.parse()
                    .map_err(|e| Error::Eval(format!("bad integer literal {text:?}: {e}")))?
            };
            Ok(Value::Int(value))
        }

        Rule::float => {
            let text = pair.as_str();
            Ok(Value::Float(text.parse().map_err(|e| {
                Error::Eval(format!("bad float literal {text:?}: {e}"))
            })?))
        }

        Rule::string => {
            let inner = first_inner(pair)?;
            Ok(Value::Str(unescape(inner.as_str())))
        }

        other => Err(Error::Eval(format!("unexpected grammar rule {other:?}"))),
    }
}

fn eval_function_call(pair: Pair<Rule>, ctx: &dyn Context) -> Result<Value, Error> {
    let mut inner = pair.into_inner();
    let name = next(&mut inner)?.as_str();
    let mut args = Vec::new();
    for arg in inner {
        args.push(eval_pair(arg, ctx)?);
    }
    call_builtin(name, args, ctx)
}

fn call_builtin(name: &str, args: Vec<Value>, ctx: &dyn Context) -> Result<Value, Error> {
    match (name, args.len()) {
        ("architecture", 0) => Ok(Value::Str(ctx.architecture())),
        ("os", 0) => Ok(Value::Str(ctx.os())),
        ("processor", 0) => Ok(Value::Str(ctx.processor())),
        ("vendor", 0) => Ok(Value::Str(ctx.vendor())),
        ("triplet", 0) => Ok(Value::Str(ctx.triplet())),
        ("wpkgversion", 0) => Ok(Value::Str(ctx.wpkgversion())),
        ("getfield", 1) => {
            let field_name = args[0].to_string();
            let raw = ctx.getfield(&field_name).unwrap_or_default();
            Ok(typed_field_value(&field_name, raw))
        }
        ("versioncmp", 2) => {
            let a: crate::version::Version = args[0]
                .to_string()
                .parse()
                .map_err(|e| Error::Eval(format!("versioncmp: {e:?}")))?;
            let b: crate::version::Version = args[1]
                .to_string()
                .parse()
                .map_err(|e| Error::Eval(format!("versioncmp: {e:?}")))?;
            Ok(Value::Int(match a.cmp(&b) {
                std::cmp::Ordering::Less => -1,
                std::cmp::Ordering::Equal => 0,
                std::cmp::Ordering::Greater => 1,
            }))
        }
        (other, n) => Err(Error::Eval(format!(
            "unknown function {other}/{n}"
        ))),
    }
}

fn first_inner(pair: Pair<Rule>) -> Result<Pair<Rule>, Error> {
    pair.into_inner()
        .next()
        .ok_or_else(|| Error::Eval("expected a nested expression".into()))
}

fn next<'i>(
    inner: &mut pest::iterators::Pairs<'i, Rule>,
) -> Result<Pair<'i, Rule>, Error> {
    inner
        .next()
        .ok_or_else(|| Error::Eval("malformed expression tree".into()))
}

fn fold_int(
    pair: Pair<Rule>,
    ctx: &dyn Context,
    op: impl Fn(i64, i64, &str) -> Result<i64, Error>,
) -> Result<Value, Error> {
    let mut inner = pair.into_inner();
    let mut acc = eval_pair(next(&mut inner)?, ctx)?
        .as_i64()
        .ok_or_else(|| Error::Eval("bitwise operator requires an integer".into()))?;
    while let Some(op_pair) = inner.next() {
        let rhs = eval_pair(next(&mut inner)?, ctx)?
            .as_i64()
            .ok_or_else(|| Error::Eval("bitwise operator requires an integer".into()))?;
        acc = op(acc, rhs, op_pair.as_str())?;
    }
    Ok(Value::Int(acc))
}

fn numeric_binop(
    l: Value,
    r: Value,
    int_op: impl Fn(i64, i64) -> i64,
    float_op: impl Fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    if l.is_float() || r.is_float() {
        let a = l.as_f64().ok_or_else(|| Error::Eval("expected a number".into()))?;
        let b = r.as_f64().ok_or_else(|| Error::Eval("expected a number".into()))?;
        Ok(Value::Float(float_op(a, b)))
    } else {
        let a = l.as_i64().ok_or_else(|| Error::Eval("expected a number".into()))?;
        let b = r.as_i64().ok_or_else(|| Error::Eval("expected a number".into()))?;
        Ok(Value::Int(int_op(a, b)))
    }
}

fn add(l: Value, r: Value) -> Result<Value, Error> {
    if let (Value::Str(a), other) = (&l, &r) {
        return Ok(Value::Str(format!("{a}{other}")));
    }
    numeric_binop(l, r, |a, b| a + b, |a, b| a + b)
}

fn divide(l: Value, r: Value) -> Result<Value, Error> {
    if l.is_float() || r.is_float() {
        let a = l.as_f64().ok_or_else(|| Error::Eval("expected a number".into()))?;
        let b = r.as_f64().ok_or_else(|| Error::Eval("expected a number".into()))?;
        return Ok(Value::Float(a / b));
    }
    let a = l.as_i64().ok_or_else(|| Error::Eval("expected a number".into()))?;
    let b = r.as_i64().ok_or_else(|| Error::Eval("expected a number".into()))?;
    if b == 0 {
        return Err(Error::Eval("division by zero".into()));
    }
    Ok(Value::Int(a / b))
}

fn modulo(l: Value, r: Value) -> Result<Value, Error> {
    let a = l.as_i64().ok_or_else(|| Error::Eval("% requires an integer".into()))?;
    let b = r.as_i64().ok_or_else(|| Error::Eval("% requires an integer".into()))?;
    if b == 0 {
        return Err(Error::Eval("modulo by zero".into()));
    }
    Ok(Value::Int(a % b))
}

/// Type a field's raw text the way `getfield` reports it: hex/octal/decimal
/// integers and floats are parsed to their numeric [Value], everything else
/// stays a string. Fields whose name contains `version` (case-insensitively)
/// are always returned as a string, since versions sort lexically, not
/// numerically, even when they look like plain integers.
fn typed_field_value(name: &str, raw: String) -> Value {
    if name.to_ascii_lowercase().contains("version") {
        return Value::Str(raw);
    }
    let text = raw.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            if let Ok(v) = i64::from_str_radix(hex, 16) {
                return Value::Int(v);
            }
        }
    } else if let Some(oct) = text.strip_prefix('0') {
        if !oct.is_empty() && oct.chars().all(|c| ('0'..='7').contains(&c)) {
            if let Ok(v) = i64::from_str_radix(oct, 8) {
                return Value::Int(v);
            }
        }
    }
    if let Ok(v) = text.parse::<i64>() {
        return Value::Int(v);
    }
    if text.parse::<f64>().is_ok() && text.contains(['.', 'e', 'E']) {
        if let Ok(v) = text.parse::<f64>() {
            return Value::Float(v);
        }
    }
    Value::Str(raw)
}

fn values_equal(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Str(a), Value::Str(b)) => a == b,
        _ => match (l.as_f64(), r.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => l.to_string() == r.to_string(),
        },
    }
}

fn compare_values(l: &Value, r: &Value) -> Result<std::cmp::Ordering, Error> {
    match (l.as_f64(), r.as_f64()) {
        (Some(a), Some(b)) => a
            .partial_cmp(&b)
            .ok_or_else(|| Error::Eval("NaN is not ordered".into())),
        _ => Ok(l.to_string().cmp(&r.to_string())),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext;
    impl Context for TestContext {
        fn architecture(&self) -> String {
            "amd64".into()
        }
        fn os(&self) -> String {
            "linux".into()
        }
        fn processor(&self) -> String {
            "x86_64".into()
        }
        fn vendor(&self) -> String {
            "pc".into()
        }
        fn wpkgversion(&self) -> String {
            "1.0.0".into()
        }
        fn getfield(&self, name: &str) -> Option<String> {
            match name {
                "Package" => Some("example".into()),
                "Installed-Size" => Some("2048".into()),
                "Version" => Some("010".into()),
                _ => None,
            }
        }
    }

    #[test]
    fn arithmetic() {
        assert_eq!(evaluate("1 + 2 * 3", &TestContext).unwrap(), Value::Int(7));
        assert_eq!(evaluate("(1 + 2) * 3", &TestContext).unwrap(), Value::Int(9));
    }

    #[test]
    fn comparisons_and_logic() {
        assert_eq!(evaluate("1 < 2 && 2 < 3", &TestContext).unwrap(), Value::Bool(true));
        assert_eq!(evaluate("1 > 2 || 0 == 0", &TestContext).unwrap(), Value::Bool(true));
    }

    #[test]
    fn string_concat() {
        assert_eq!(
            evaluate("\"foo\" + \"bar\"", &TestContext).unwrap(),
            Value::Str("foobar".into())
        );
    }

    #[test]
    fn functions() {
        assert_eq!(
            evaluate("architecture()", &TestContext).unwrap(),
            Value::Str("amd64".into())
        );
        assert_eq!(
            evaluate("getfield(\"Package\")", &TestContext).unwrap(),
            Value::Str("example".into())
        );
        assert_eq!(
            evaluate("versioncmp(\"1.0\", \"2.0\")", &TestContext).unwrap(),
            Value::Int(-1)
        );
    }

    #[test]
    fn division_by_zero_errors() {
        assert!(evaluate("1 / 0", &TestContext).is_err());
    }

    #[test]
    fn getfield_types_numeric_fields() {
        assert_eq!(
            evaluate("getfield(\"Installed-Size\")", &TestContext).unwrap(),
            Value::Int(2048)
        );
        assert_eq!(
            evaluate("getfield(\"Installed-Size\") > 1000", &TestContext).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn getfield_keeps_version_fields_as_strings() {
        assert_eq!(
            evaluate("getfield(\"Version\")", &TestContext).unwrap(),
            Value::Str("010".into())
        );
    }
}

// vim: foldmethod=marker
