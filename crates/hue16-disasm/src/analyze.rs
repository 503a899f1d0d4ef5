use serde::Serialize;

use hue16::disasm::{branch_targets, label_name};
use hue16::{Diagnostic, Disassembly, ListingLine};

/// A jump from the word at `from` to address `to`.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOut {
    pub from: usize,
    pub to: u16,
    /// `None` when the target lies beyond the trailing label.
    pub label: Option<String>,
    pub dangling: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LabelKV {
    pub addr: u16,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub words: usize,
    pub listing: Vec<ListingLine>,
    pub edges: Vec<EdgeOut>,
    pub labels: Vec<LabelKV>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn edges(dis: &Disassembly) -> Vec<EdgeOut> {
    let count = dis.slots.len();
    dis.slots
        .iter()
        .enumerate()
        .filter_map(|(from, s)| {
            let to = s.as_ref().ok()?.insn.branch_target()?;
            Some(EdgeOut {
                from,
                to,
                label: (to as usize <= count).then(|| label_name(to)),
                dangling: to as usize >= count,
            })
        })
        .collect()
}

/// Labels the listing actually declares.
pub fn labels(dis: &Disassembly) -> Vec<LabelKV> {
    let count = dis.slots.len();
    branch_targets(&dis.slots)
        .into_iter()
        .filter(|&addr| addr as usize <= count)
        .map(|addr| LabelKV { addr, name: label_name(addr) })
        .collect()
}

pub fn report(dis: &Disassembly) -> Report {
    Report {
        words: dis.slots.len(),
        listing: dis.lines.clone(),
        edges: edges(dis),
        labels: labels(dis),
        diagnostics: dis.diagnostics.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hue16::{disassemble, Isa};
    use pretty_assertions::assert_eq;

    #[test]
    fn loop_edges_and_labels() {
        // LOOP: SUB R1, R2, R3 / JUMP LOOP / JUMP past-the-end
        let words: [u16; 3] = [0b00001_001_010_011_00, 0b01001 << 11, (0b01001 << 11) | 9];
        let dis = disassemble(&Isa::new(), &words);
        let r = report(&dis);
        assert_eq!(r.words, 3);
        assert_eq!(r.edges.len(), 2);
        assert_eq!((r.edges[0].from, r.edges[0].to, r.edges[0].dangling), (1, 0, false));
        assert_eq!(r.edges[0].label.as_deref(), Some("BRANCH0"));
        assert!(r.edges[1].dangling);
        assert_eq!(r.edges[1].label, None);
        assert_eq!(r.labels, vec![LabelKV { addr: 0, name: "BRANCH0".into() }]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["listing"][0]["kind"], "label");
        assert_eq!(json["listing"][3]["kind"], "raw");
        assert_eq!(json["diagnostics"][0]["kind"], "DanglingBranchTarget");
    }
}
