pub mod llvm;

/// Lowers a LIR node into some target's representation, threading a
/// target-specific context through.
trait Codegen<Ctx> {
    type Output;

    fn codegen(&self, ctx: &mut Ctx) -> Self::Output;
}

impl<T, I, Ctx> Codegen<Ctx> for Vec<T>
where
    T: Codegen<Ctx, Output = I>,
{
    type Output = Vec<I>;

    fn codegen(&self, ctx: &mut Ctx) -> Self::Output {
        self.iter().map(|t| t.codegen(ctx)).collect()
    }
}
