//! Adapters turning ordinary closures into [`Step`]s.
//!
//! Any `Fn(A1, .., An) -> R` with up to eight [`StepValue`] parameters is a
//! step. The return type decides what gets stored:
//!
//! - a single [`StepValue`] produces one output
//! - `()` produces none
//! - a tuple of [`StepValue`]s produces one output per element
//! - `Result<R, E>` produces the outputs of `R`, or fails the step with `E`

use anyhow::anyhow;

use crate::value::{StepValue, TypeTag, Value};

use super::definition::Step;

/// Return types a step closure may have.
pub trait IntoOutputs {
    /// Declared tags of the produced values.
    fn type_tags() -> Vec<TypeTag>;

    /// Convert into stored values.
    fn into_outputs(self) -> anyhow::Result<Vec<Value>>;
}

impl<T: StepValue> IntoOutputs for T {
    fn type_tags() -> Vec<TypeTag> {
        vec![T::type_tag()]
    }

    fn into_outputs(self) -> anyhow::Result<Vec<Value>> {
        Ok(vec![self.into_value()])
    }
}

impl IntoOutputs for () {
    fn type_tags() -> Vec<TypeTag> {
        Vec::new()
    }

    fn into_outputs(self) -> anyhow::Result<Vec<Value>> {
        Ok(Vec::new())
    }
}

impl<R, E> IntoOutputs for Result<R, E>
where
    R: IntoOutputs,
    E: Into<anyhow::Error>,
{
    fn type_tags() -> Vec<TypeTag> {
        R::type_tags()
    }

    fn into_outputs(self) -> anyhow::Result<Vec<Value>> {
        self.map_err(Into::into)?.into_outputs()
    }
}

macro_rules! impl_tuple_outputs {
    ($($ty:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($ty: StepValue),+> IntoOutputs for ($($ty,)+) {
            fn type_tags() -> Vec<TypeTag> {
                vec![$($ty::type_tag()),+]
            }

            fn into_outputs(self) -> anyhow::Result<Vec<Value>> {
                let ($($ty,)+) = self;
                Ok(vec![$($ty.into_value()),+])
            }
        }
    };
}

impl_tuple_outputs!(A);
impl_tuple_outputs!(A, B);
impl_tuple_outputs!(A, B, C);
impl_tuple_outputs!(A, B, C, D);
impl_tuple_outputs!(A, B, C, D, E);
impl_tuple_outputs!(A, B, C, D, E, F);

/// Conversion into a boxed [`Step`].
///
/// `Marker` only disambiguates the closure arity; callers never name it.
pub trait IntoStep<Marker> {
    /// Box the step.
    fn into_step(self) -> Box<dyn Step>;
}

impl IntoStep<Box<dyn Step>> for Box<dyn Step> {
    fn into_step(self) -> Box<dyn Step> {
        self
    }
}

type StepFn = Box<dyn Fn(Vec<Value>) -> anyhow::Result<Vec<Value>> + Send + Sync>;

/// A closure together with its declared signature.
struct FnStep {
    parameters: Vec<TypeTag>,
    returns: Vec<TypeTag>,
    call: StepFn,
}

impl Step for FnStep {
    fn parameter_types(&self) -> &[TypeTag] {
        &self.parameters
    }

    fn return_types(&self) -> &[TypeTag] {
        &self.returns
    }

    fn invoke(&self, args: Vec<Value>) -> anyhow::Result<Vec<Value>> {
        (self.call)(args)
    }
}

fn next_arg<T: StepValue>(
    args: &mut impl Iterator<Item = (usize, Value)>,
) -> anyhow::Result<T> {
    let (position, value) = args
        .next()
        .ok_or_else(|| anyhow!("missing argument of type {}", T::type_tag()))?;
    T::from_value(&value).ok_or_else(|| {
        anyhow!(
            "argument {} has type {}, expected {}",
            position,
            value.type_name(),
            T::type_tag()
        )
    })
}

macro_rules! impl_into_step {
    ($($param:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<Func, Ret, $($param,)*> IntoStep<fn($($param,)*) -> Ret> for Func
        where
            Func: Fn($($param),*) -> Ret + Send + Sync + 'static,
            Ret: IntoOutputs + 'static,
            $($param: StepValue,)*
        {
            fn into_step(self) -> Box<dyn Step> {
                Box::new(FnStep {
                    parameters: vec![$($param::type_tag()),*],
                    returns: Ret::type_tags(),
                    call: Box::new(move |args: Vec<Value>| {
                        let mut args = args.into_iter().enumerate();
                        $(let $param = next_arg::<$param>(&mut args)?;)*
                        (self)($($param),*).into_outputs()
                    }),
                })
            }
        }
    };
}

impl_into_step!();
impl_into_step!(A);
impl_into_step!(A, B);
impl_into_step!(A, B, C);
impl_into_step!(A, B, C, D);
impl_into_step!(A, B, C, D, E);
impl_into_step!(A, B, C, D, E, F);
impl_into_step!(A, B, C, D, E, F, G);
impl_into_step!(A, B, C, D, E, F, G, H);
