use std::mem;

use log::{debug, trace};

use crate::models::Node;

use super::{
    buffer::Buffer,
    classify::{self, DirectiveHeader, LinkTarget},
    directives::{DirectiveContext, Directives, PendingDirective},
    env::Environment,
    error::ParseError,
    sections::SectionStack,
    source::{LineView, Lines},
    state::{State, StateKind, Step},
    units::{
        BlockUnit, CodeUnit, CommentUnit, DefinitionListUnit, ListUnit, ParsingUnit, TableUnit,
        TitleUnit,
    },
};

/// The document state machine.
///
/// Walks prepared lines one at a time. Each line is fed to the current state,
/// which either consumes it or switches state and asks for the same line to
/// be fed again. Buffered content becomes a node when the state is flushed.
pub struct DocumentParser<'a> {
    env: &'a mut Environment,
    directives: &'a Directives,
    state: State,
    buffer: Buffer,
    sections: SectionStack,
    pending: Option<PendingDirective>,
    nodes: Vec<Node>,
}

impl<'a> DocumentParser<'a> {
    pub fn new(env: &'a mut Environment, directives: &'a Directives) -> Self {
        Self {
            env,
            directives,
            state: State::default(),
            buffer: Buffer::new(),
            sections: SectionStack::new(),
            pending: None,
            nodes: Vec::new(),
        }
    }

    /// Parses all lines and returns the document's nodes.
    pub fn run(mut self, lines: &Lines) -> Result<Vec<Node>, ParseError> {
        for line in lines.views() {
            self.env.set_line(line.number);
            while self.parse_line(&line)? == Step::Reprocess {}
        }

        // The first flush emits the trailing region, the second settles a
        // directive whose header was the last thing read.
        self.flush()?;
        self.flush()?;

        let ends = self.sections.close_all();
        self.nodes.extend(ends);
        Ok(self.nodes)
    }

    fn parse_line(&mut self, line: &LineView<'_>) -> Result<Step, ParseError> {
        match self.state.kind() {
            StateKind::Begin => self.begin(line),
            StateKind::Normal => self.normal(line),
            StateKind::List | StateKind::DefinitionList | StateKind::Block | StateKind::Code => {
                self.delegate(line, true)
            }
            StateKind::Table => {
                let reprocess = !self.env.options().legacy_table_termination;
                self.delegate(line, reprocess)
            }
            StateKind::Comment => self.comment(line),
            StateKind::Directive => self.directive(line),
            // Titles and separators are flushed as soon as they are entered.
            StateKind::Title | StateKind::Separator => {
                self.flush()?;
                Ok(Step::Reprocess)
            }
        }
    }

    fn begin(&mut self, line: &LineView<'_>) -> Result<Step, ParseError> {
        let text = line.text;
        let literal = matches!(self.state, State::Begin { literal: true });

        if classify::is_blank(text) {
            return Ok(Step::Consumed);
        }
        if classify::is_list_line(text, literal) {
            self.transition(State::List(ListUnit::new(literal)));
            return Ok(Step::Reprocess);
        }
        if classify::is_block_line(text) {
            if literal {
                self.transition(State::Code(CodeUnit));
            } else {
                self.transition(State::Block(BlockUnit));
            }
            return Ok(Step::Reprocess);
        }
        if let Some(target) = classify::parse_link(text) {
            self.register_link(target);
            return Ok(Step::Consumed);
        }
        if let Some(header) = classify::parse_directive(text) {
            self.flush()?;
            self.open_directive(header, line);
            return Ok(Step::Consumed);
        }
        if !classify::is_comment(text) && line.next.is_some_and(classify::is_definition_list) {
            self.buffer.push(text);
            self.transition(State::DefinitionList(DefinitionListUnit::new()));
            return Ok(Step::Consumed);
        }
        if let Some(separator) = classify::parse_table_separator(text) {
            self.buffer.push(text);
            self.transition(State::Table(TableUnit::new(separator)));
            return Ok(Step::Consumed);
        }

        self.transition(State::Normal);
        Ok(Step::Reprocess)
    }

    fn normal(&mut self, line: &LineView<'_>) -> Result<Step, ParseError> {
        let text = line.text;

        if classify::is_blank(text) {
            self.flush()?;
            return Ok(Step::Consumed);
        }
        if let Some(marker) = classify::special_line(text) {
            match self.buffer.pop() {
                Some(title) => {
                    self.buffer.replace_all(vec![title]);
                    self.transition(State::Title(TitleUnit::new(marker)));
                }
                None => {
                    self.buffer.push(text);
                    self.transition(State::Separator(marker));
                }
            }
            self.flush()?;
            return Ok(Step::Consumed);
        }
        if classify::is_directive(text) || classify::parse_link(text).is_some() {
            self.flush()?;
            return Ok(Step::Reprocess);
        }
        if classify::is_comment(text) {
            self.flush()?;
            self.transition(State::Comment(CommentUnit::new(text)));
            return Ok(Step::Consumed);
        }

        self.buffer.push(text);
        Ok(Step::Consumed)
    }

    /// Feeds the line to the current parsing unit. A declined line ends the
    /// construct and, when `reprocess` is set, is parsed again from BEGIN.
    fn delegate(&mut self, line: &LineView<'_>, reprocess: bool) -> Result<Step, ParseError> {
        let accepted = match self.state.unit_mut() {
            Some(unit) => unit.accept(line, &mut self.buffer),
            None => false,
        };
        if accepted {
            return Ok(Step::Consumed);
        }

        self.flush()?;
        if reprocess {
            Ok(Step::Reprocess)
        } else {
            trace!("dropping line {} after table", line.number);
            Ok(Step::Consumed)
        }
    }

    /// A comment that ends mid-document is dropped without a flush.
    fn comment(&mut self, line: &LineView<'_>) -> Result<Step, ParseError> {
        let accepted = match self.state.unit_mut() {
            Some(unit) => unit.accept(line, &mut self.buffer),
            None => false,
        };
        if accepted {
            return Ok(Step::Consumed);
        }
        self.transition(State::Begin { literal: false });
        Ok(Step::Reprocess)
    }

    fn directive(&mut self, line: &LineView<'_>) -> Result<Step, ParseError> {
        let text = line.text;

        if let Some(pending) = self.pending.as_mut()
            && let Some((name, value)) = classify::parse_directive_option(text)
        {
            trace!("option {name:?} = {value:?} for {:?}", pending.name());
            pending.options.insert(name, value);
            return Ok(Step::Consumed);
        }
        if let Some(header) = classify::parse_directive(text) {
            self.flush()?;
            self.open_directive(header, line);
            return Ok(Step::Consumed);
        }

        let directives = self.directives;
        let literal = self
            .pending
            .as_ref()
            .and_then(|pending| directives.get(pending.name()))
            .is_some_and(|directive| directive.wants_code());
        self.transition(State::Begin { literal });
        Ok(Step::Reprocess)
    }

    fn open_directive(&mut self, header: DirectiveHeader, line: &LineView<'_>) {
        if self.directives.contains(&header.name) {
            debug!("directive {:?} opened at line {}", header.name, line.number);
            self.pending = Some(PendingDirective::new(header, line.number));
            self.transition(State::Directive);
        } else {
            let message = format!(
                "Unknown directive \"{}\" in \"{}\" for line \"{}\"",
                header.name,
                self.env.file_label(),
                line.text
            );
            self.env.add_error(message);
            self.transition(State::Begin { literal: false });
        }
    }

    fn register_link(&mut self, target: LinkTarget) {
        match target {
            LinkTarget::Named { name, url } => self.env.set_link(&name, &url),
            LinkTarget::Anonymous { url } => self.env.add_anonymous_link(&url),
            LinkTarget::Anchor { name } => self.nodes.push(Node::Anchor(name)),
        }
    }

    /// Turns the current state and buffer into at most one node, hands it to
    /// a pending directive if there is one, and returns to BEGIN.
    fn flush(&mut self) -> Result<(), ParseError> {
        let state = mem::take(&mut self.state);
        let kind = state.kind();
        let mut literal = false;
        let mut sections = Vec::new();

        let node = match state {
            State::Begin { .. } | State::Directive => None,
            State::Normal => {
                literal = self.take_literal_marker();
                if self.buffer.is_empty() {
                    None
                } else {
                    let text = self.buffer.joined_text();
                    Some(Node::Paragraph(self.env.inline(&text)))
                }
            }
            State::Title(mut unit) => {
                sections = self.open_section(&mut unit)?;
                None
            }
            State::Separator(marker) => Some(Node::Separator(self.env.level_for(marker))),
            State::List(mut unit) => Some(unit.finish(&self.buffer, self.env)),
            State::DefinitionList(mut unit) => Some(unit.finish(&self.buffer, self.env)),
            State::Block(mut unit) => Some(unit.finish(&self.buffer, self.env)),
            State::Code(mut unit) => Some(unit.finish(&self.buffer, self.env)),
            State::Table(mut unit) => Some(unit.finish(&self.buffer, self.env)),
            State::Comment(mut unit) => Some(unit.finish(&self.buffer, self.env)),
        };

        if node.is_some() || !sections.is_empty() || self.pending.is_some() {
            debug!(
                "flush {kind:?} -> {}",
                node.as_ref().map_or("nothing", Node::kind)
            );
        }

        let data = self.buffer.take();
        match self.pending.take() {
            Some(pending) => self.invoke(pending, node, &data),
            None => self.nodes.extend(node),
        }
        self.nodes.extend(sections);

        self.state = State::Begin { literal };
        Ok(())
    }

    /// Strips a trailing `::` from the last buffered line. `text::` keeps one
    /// colon, `text ::` loses both and a bare `::` line disappears. Returns
    /// whether a marker was found.
    fn take_literal_marker(&mut self) -> bool {
        let Some(last) = self.buffer.last() else {
            return false;
        };
        let Some(stripped) = last.trim_end().strip_suffix("::") else {
            return false;
        };
        let replacement = if stripped.trim().is_empty() {
            None
        } else if stripped.ends_with(char::is_whitespace) {
            Some(stripped.trim_end().to_string())
        } else {
            Some(format!("{stripped}:"))
        };

        match replacement {
            Some(line) => {
                let index = self.buffer.len() - 1;
                self.buffer.set(index, &line);
            }
            None => {
                self.buffer.pop();
            }
        }
        true
    }

    fn open_section(&mut self, unit: &mut TitleUnit) -> Result<Vec<Node>, ParseError> {
        match unit.finish(&self.buffer, self.env) {
            Node::Title(title) => Ok(self.sections.open(title)),
            other => Err(ParseError::NotATitle { found: other.kind() }),
        }
    }

    fn invoke(&mut self, pending: PendingDirective, body: Option<Node>, data: &[String]) {
        let directives = self.directives;
        let Some(directive) = directives.get(pending.name()) else {
            self.nodes.extend(body);
            return;
        };
        debug!(
            "invoking directive {:?} from line {}",
            pending.name(),
            pending.line
        );

        let line = self.env.line();
        self.env.set_line(pending.line);
        let mut ctx = DirectiveContext::new(self.env, directives, &mut self.nodes);
        let result = directive.process(
            &mut ctx,
            body,
            &pending.header.variable,
            data,
            &pending.options,
        );
        if let Err(err) = result {
            let message = format!(
                "Error while processing \"{}\" directive in \"{}\": {err}",
                pending.name(),
                self.env.file_label()
            );
            self.env.add_error(message);
        }
        self.env.set_line(line);
    }

    fn transition(&mut self, next: State) {
        trace!("{:?} -> {:?}", self.state.kind(), next.kind());
        self.state = next;
    }
}
