//! Macros for ergonomic automaton construction.

/// Build an [`Automaton`](crate::core::Automaton) from a compact description.
///
/// Expands to [`AutomatonBuilder`](crate::builder::AutomatonBuilder) calls and
/// evaluates to `Result<Automaton, BuildError>`. State identifiers double as
/// ids and display names; transitions are numbered `t0`, `t1`, ... in order.
///
/// # Example
///
/// ```
/// use automaton_lab::automaton;
/// use automaton_lab::core::EPSILON;
///
/// let automaton = automaton! {
///     name: "a then optional b",
///     states: [q0, q1, q2],
///     start: q0,
///     accept: [q1, q2],
///     transitions: [
///         q0 -> q1: ["a"],
///         q1 -> q2: ["b", EPSILON],
///     ],
/// }
/// .unwrap();
///
/// assert_eq!(automaton.name(), "a then optional b");
/// assert_eq!(automaton.transitions().len(), 2);
/// ```
#[macro_export]
macro_rules! automaton {
    (
        $(name: $name:expr,)?
        states: [$($state:ident),* $(,)?]
        $(, start: $start:ident)?
        $(, accept: [$($accept:ident),* $(,)?])?
        $(, transitions: [
            $($from:ident -> $to:ident : [$($symbol:expr),+ $(,)?]),* $(,)?
        ])?
        $(,)?
    ) => {
        $crate::builder::AutomatonBuilder::new()
            $(.name($name))?
            $(.state(stringify!($state)))*
            $(.start(stringify!($start)))?
            $($(.accept(stringify!($accept)))*)?
            $($(.add_transition(stringify!($from), stringify!($to), [$($symbol),+]))*)?
            .build()
    };
}
