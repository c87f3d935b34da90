use super::units::{
    BlockUnit, CodeUnit, CommentUnit, DefinitionListUnit, ListUnit, ParsingUnit, TableUnit,
    TitleUnit,
};

/// Where the state machine is. Multi-line states own their parsing unit.
#[derive(Debug, Clone)]
pub enum State {
    /// Between constructs. `literal` is set after a `::` paragraph or a
    /// literal-body directive, and turns the next indented region into code.
    Begin { literal: bool },
    /// Accumulating a paragraph.
    Normal,
    Title(TitleUnit),
    /// A transition line made of the given character.
    Separator(char),
    List(ListUnit),
    DefinitionList(DefinitionListUnit),
    Block(BlockUnit),
    Code(CodeUnit),
    Table(TableUnit),
    Comment(CommentUnit),
    /// Reading the options of a pending directive.
    Directive,
}

/// Tag of a [`State`], for dispatch and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Begin,
    Normal,
    Title,
    Separator,
    List,
    DefinitionList,
    Block,
    Code,
    Table,
    Comment,
    Directive,
}

impl Default for State {
    fn default() -> Self {
        State::Begin { literal: false }
    }
}

impl State {
    pub fn kind(&self) -> StateKind {
        match self {
            State::Begin { .. } => StateKind::Begin,
            State::Normal => StateKind::Normal,
            State::Title(_) => StateKind::Title,
            State::Separator(_) => StateKind::Separator,
            State::List(_) => StateKind::List,
            State::DefinitionList(_) => StateKind::DefinitionList,
            State::Block(_) => StateKind::Block,
            State::Code(_) => StateKind::Code,
            State::Table(_) => StateKind::Table,
            State::Comment(_) => StateKind::Comment,
            State::Directive => StateKind::Directive,
        }
    }

    /// The parsing unit of a state that delegates lines to one.
    pub fn unit_mut(&mut self) -> Option<&mut dyn ParsingUnit> {
        match self {
            State::Title(unit) => Some(unit),
            State::List(unit) => Some(unit),
            State::DefinitionList(unit) => Some(unit),
            State::Block(unit) => Some(unit),
            State::Code(unit) => Some(unit),
            State::Table(unit) => Some(unit),
            State::Comment(unit) => Some(unit),
            State::Begin { .. } | State::Normal | State::Separator(_) | State::Directive => None,
        }
    }
}

/// Outcome of feeding one line to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move on to the next line.
    Consumed,
    /// The state changed; feed the same line again.
    Reprocess,
}
