//! # Composing fused transcripts
//!
//! One algorithm per rearrangement type. Each consumes the [`FusionContext`], picks the
//! left or right part of both genes, turns one of them around where the genes are joined
//! head to head or tail to tail, and lays the 3' part next to the 5' part on an axis that
//! starts at 0.
use log::debug;

use crate::{
    error::{FusionError, Result},
    fusion::{
        parts::{get_left_part, get_right_part},
        Direction, FusionContext, FusionKind, FusionLayout,
    },
    orientation::{reverse_fusion, shift_left_to, turn_backwards},
    transcript::GeneTranscript,
};

impl FusionContext {
    /// Run the composition algorithm for `kind`.
    pub fn fuse(self, kind: FusionKind) -> Result<FusionLayout> {
        match kind {
            FusionKind::Deletion => self.fuse_deletion(),
            FusionKind::TandemDuplication => self.fuse_tandem_duplication(),
            FusionKind::Inversion => self.fuse_inversion(),
            FusionKind::Translocation(p5dir, p3dir) => self.fuse_translocation(p5dir, p3dir),
        }
    }

    /// Fuse two genes on the same strand whose intergenic region got deleted.
    pub fn fuse_deletion(self) -> Result<FusionLayout> {
        debug!(
            "Fusing deletion {} -> {}",
            self.prime5.gene_name, self.prime3.gene_name
        );
        let layout = self.join_collinear()?;
        reverse_fusion(layout)
    }

    /// Fuse two genes on the same strand brought together by a tandem duplication.
    /// The junction looks the same as for a deletion: the 5' gene up to its breakpoint,
    /// followed by the 3' gene from its breakpoint.
    pub fn fuse_tandem_duplication(self) -> Result<FusionLayout> {
        debug!(
            "Fusing tandem duplication {} -> {}",
            self.prime5.gene_name, self.prime3.gene_name
        );
        let layout = self.join_collinear()?;
        reverse_fusion(layout)
    }

    /// Fuse two genes on opposite strands joined by an inversion.
    /// ```text
    /// -->  <--   forward 5': turn the 3' part
    /// <--  -->   reverse 5': turn the 5' part
    /// ```
    pub fn fuse_inversion(self) -> Result<FusionLayout> {
        let FusionContext { prime5, prime3, .. } = self;
        let (prime5part, prime3part) = if prime5.strand.sign() > 0 {
            debug!("Forward 5' inversion {} -> {}", prime5.gene_name, prime3.gene_name);
            (
                get_left_part(prime5)?,
                turn_backwards(get_left_part(prime3)?)?,
            )
        } else {
            debug!("Reverse 5' inversion {} -> {}", prime5.gene_name, prime3.gene_name);
            (
                turn_backwards(get_right_part(prime5)?)?,
                get_right_part(prime3)?,
            )
        };

        stack(&prime5part, &prime3part)
    }

    /// Fuse breakend mates. `p5dir` and `p3dir` tell which side of its breakpoint each gene
    /// keeps. Chromosomes are not checked, the two genes usually sit on different ones.
    pub fn fuse_translocation(self, p5dir: Direction, p3dir: Direction) -> Result<FusionLayout> {
        let FusionContext { prime5, prime3, .. } = self;
        debug!(
            "Fusing translocation {} ({p5dir:?}) -> {} ({p3dir:?})",
            prime5.gene_name, prime3.gene_name
        );

        let (prime5part, prime3part) = match (p5dir, p3dir) {
            // forward antiparallel: the reverse 3' gene is read backwards
            (Direction::Left, Direction::Left) => (
                get_left_part(prime5)?,
                turn_backwards(get_left_part(prime3)?)?,
            ),
            (Direction::Right, Direction::Left) => (
                turn_backwards(get_right_part(prime5)?)?,
                get_left_part(prime3)?,
            ),
            (Direction::Left, Direction::Right) => {
                (get_left_part(prime5)?, get_right_part(prime3)?)
            }
            (Direction::Right, Direction::Right) => {
                return Err(FusionError::UnsupportedOrientation {
                    prime5: p5dir,
                    prime3: p3dir,
                })
            }
        };

        stack(&prime5part, &prime3part)
    }

    /// Shared by deletions and tandem duplications: 5' and 3' part are cut from genes on
    /// the same strand, the 3' part is moved right next to the 5' part and the whole
    /// picture is moved to start at 0.
    fn join_collinear(self) -> Result<FusionLayout> {
        let FusionContext { prime5, prime3, .. } = self;
        let (prime5part, prime3part) = if prime5.strand.sign() < 0 {
            // |<-<-<-<-|     |<-<-<-<-|
            //     |-------------|
            (get_right_part(prime5)?, get_left_part(prime3)?)
        } else {
            // |->->->->|     |->->->->|
            //     |-------------|
            (get_left_part(prime5)?, get_right_part(prime3)?)
        };
        log_part("5'", &prime5part);
        log_part("3'", &prime3part);

        let shift = if prime5part.strand.sign() > 0 {
            prime5part.breakpoint()? - prime3part.begin()? + 1
        } else {
            prime5part.begin()? - prime3part.end()?
        };
        let shifted3p = prime3part.exons.translate(shift);

        let left_shift = prime5part.exons.union(&shifted3p).begin()?;
        Ok(FusionLayout {
            prime5: prime5part.exons.translate(-left_shift),
            prime3: shifted3p.translate(-left_shift),
        })
    }
}

/// Put the 5' part at 0 and the 3' part right where the 5' part ends.
fn stack(prime5part: &GeneTranscript, prime3part: &GeneTranscript) -> Result<FusionLayout> {
    let based5p = shift_left_to(0, prime5part)?;
    let based3p = shift_left_to(based5p.end()?, prime3part)?;
    debug!("5' part: {based5p}");
    debug!("3' part: {based3p}");

    Ok(FusionLayout {
        prime5: based5p,
        prime3: based3p,
    })
}

fn log_part(end: &str, part: &GeneTranscript) {
    for line in part.bed_lines() {
        debug!("{end} {}\t{line}", part.gene_name);
    }
}
