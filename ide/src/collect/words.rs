use super::Collect;
use crate::abbreviation::matches;
use crate::fragment::{Fragment, Literal};
use analyzer::Keyword;
use analyzer::semantic::{PrimitiveKind, Ty};

pub(super) fn keywords(keywords: &[Keyword], request: &Collect<'_>, out: &mut Vec<Fragment>) {
    out.extend(
        keywords
            .iter()
            .filter(|kw| matches(kw.as_str(), request.abbreviation))
            .map(|&kw| Fragment::Keyword(kw)),
    );
}

pub(super) fn modifiers(modifiers: &[Keyword], request: &Collect<'_>, out: &mut Vec<Fragment>) {
    out.extend(
        modifiers
            .iter()
            .filter(|kw| matches(kw.as_str(), request.abbreviation))
            .map(|&kw| Fragment::Modifier(kw)),
    );
}

pub(super) fn primitive_types(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    out.extend(
        PrimitiveKind::ALL
            .into_iter()
            .filter(|p| matches(p.keyword(), request.abbreviation))
            .map(Fragment::PrimitiveType),
    );
}

pub(super) fn literals(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    for (literal, ty) in [
        (Literal::True, Ty::Primitive(PrimitiveKind::Boolean)),
        (Literal::False, Ty::Primitive(PrimitiveKind::Boolean)),
        (Literal::Null, Ty::Null),
    ] {
        if matches(literal.text(), request.abbreviation) && request.fits(&ty) {
            out.push(Fragment::Literal(literal));
        }
    }
}

/// `this` inside an instance method or constructor.
pub(super) fn this(request: &Collect<'_>, out: &mut Vec<Fragment>) {
    if !matches(Keyword::This.as_str(), request.abbreviation) {
        return;
    }
    let model = request.model;
    let (Some(ty), Some(method)) = (
        model.enclosing_type(request.caret),
        model.enclosing_method(request.caret),
    ) else {
        return;
    };
    if !method.is_static && request.fits(&ty.as_ty()) {
        out.push(Fragment::Keyword(Keyword::This));
    }
}
