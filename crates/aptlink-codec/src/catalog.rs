//! Payload layouts of every supported message.
//!
//! When an identifier appears in more than one group, the first group wins.

use crate::ids::*;
use crate::layout::FieldKind::{self, Bytes, Pad, F32, I16, I32, U16, U32};

const WORDS_1: &[FieldKind] = &[U16];
const WORDS_2: &[FieldKind] = &[U16, U16];
const WORDS_3: &[FieldKind] = &[U16, U16, U16];
const WORDS_5: &[FieldKind] = &[U16, U16, U16, U16, U16];
const WORDS_6: &[FieldKind] = &[U16, U16, U16, U16, U16, U16];
const WORDS_7: &[FieldKind] = &[U16, U16, U16, U16, U16, U16, U16];
const WORDS_9: &[FieldKind] = &[U16, U16, U16, U16, U16, U16, U16, U16, U16];
const WORDS_32: &[FieldKind] = &[U16; 32];

/// Identifiers whose payload nests submessages and cannot be described
/// by a fixed layout.
pub(crate) const VARIABLE_LENGTH: &[u16] = &[
    MGMSG_LA_SET_PARAMS,
    MGMSG_LA_GET_PARAMS,
    MGMSG_QUAD_SET_PARAMS,
    MGMSG_QUAD_GET_PARAMS,
];

pub(crate) const LAYOUTS: &[(&[u16], &[FieldKind])] = &[
    (
        &[
            MGMSG_PZ_SET_TPZ_DISPSETTINGS,
            MGMSG_PZ_GET_TPZ_DISPSETTINGS,
            MGMSG_NT_SET_TNA_DISPSETTINGS,
            MGMSG_NT_GET_TNA_DISPSETTINGS,
            MGMSG_QUAD_SET_EEPROMPARAMS,
        ],
        WORDS_1,
    ),
    (
        &[
            MGMSG_MOT_GET_ADCINPUTS,
            MGMSG_MOT_SET_AVMODES,
            MGMSG_MOT_GET_AVMODES,
            MGMSG_MOT_SET_TDIPARAMS,
            MGMSG_MOT_GET_TDIPARAMS,
            MGMSG_PZ_SET_OUTPUTVOLTS,
            MGMSG_PZ_GET_OUTPUTVOLTS,
            MGMSG_PZ_SET_OUTPUTPOS,
            MGMSG_PZ_GET_OUTPUTPOS,
            MGMSG_PZ_SET_INPUTVOLTSSRC,
            MGMSG_PZ_GET_INPUTVOLTSSRC,
            MGMSG_PZ_SET_EEPROMPARAMS,
            MGMSG_PZ_GET_MAXTRAVEL,
            MGMSG_PZ_SET_NTCIRCHOMEPOS,
            MGMSG_PZ_GET_NTCIRCHOMEPOS,
            MGMSG_NT_SET_EEPROMPARAMS,
        ],
        WORDS_2,
    ),
    (
        &[
            MGMSG_PZ_SET_PICONSTS,
            MGMSG_PZ_GET_PICONSTS,
            MGMSG_PZ_SET_OUTPUTLUT,
            MGMSG_PZ_GET_OUTPUTLUT,
            MGMSG_MOT_SET_EEPROMPARAMS,
            MGMSG_PZ_SET_OUTPUTMAXVOLTS,
            MGMSG_PZ_GET_OUTPUTMAXVOLTS,
            MGMSG_PZ_SET_TPZ_SLEWRATES,
            MGMSG_PZ_GET_TPZ_SLEWRATES,
            MGMSG_PZ_GET_TSG_READING,
        ],
        WORDS_3,
    ),
    (
        &[
            MGMSG_MOT_SET_POWERPARAMS,
            MGMSG_MOT_GET_POWERPARAMS,
            MGMSG_PZ_SET_TPZ_IOSETTINGS,
            MGMSG_PZ_GET_TPZ_IOSETTINGS,
            MGMSG_PZ_SET_IOSETTINGS,
            MGMSG_PZ_GET_IOSETTINGS,
        ],
        WORDS_5,
    ),
    (
        &[
            MGMSG_MOT_SET_PMDTRACKSETTLEPARAMS,
            MGMSG_MOT_GET_PMDTRACKSETTLEPARAMS,
            MGMSG_PZ_SET_NTCIRCPARAMS,
            MGMSG_PZ_GET_NTCIRCPARAMS,
        ],
        WORDS_6,
    ),
    (
        &[
            MGMSG_PZ_SET_TSG_IOSETTINGS,
            MGMSG_PZ_GET_TSG_IOSETTINGS,
            MGMSG_MOT_SET_PMDMOTOROUTPUTPARAMS,
            MGMSG_MOT_GET_PMDMOTOROUTPUTPARAMS,
        ],
        WORDS_7,
    ),
    (
        &[
            MGMSG_MOT_SET_PMDSETTLEDCURRENTLOOPPARAMS,
            MGMSG_MOT_GET_PMDSETTLEDCURRENTLOOPPARAMS,
        ],
        WORDS_9,
    ),
    (
        &[
            MGMSG_MOT_SET_GENMOVEPARAMS,
            MGMSG_MOT_SET_MOVERELPARAMS,
            MGMSG_MOT_SET_MOVEABSPARAMS,
            MGMSG_MOT_SET_POSCOUNTER,
            MGMSG_MOT_GET_POSCOUNTER,
            MGMSG_MOT_SET_ENCCOUNTER,
            MGMSG_MOT_GET_ENCCOUNTER,
            MGMSG_MOT_MOVE_ABSOLUTE,
        ],
        &[U16, I32],
    ),
    (
        &[
            MGMSG_MOT_GET_GENMOVEPARAMS,
            MGMSG_MOT_GET_MOVERELPARAMS,
            MGMSG_MOT_GET_MOVEABSPARAMS,
            MGMSG_MOT_MOVE_RELATIVE,
            MGMSG_MOT_SET_VELPARAMS,
            MGMSG_MOT_GET_VELPARAMS,
        ],
        &[U16, I32, I32, I32],
    ),
    (
        &[
            MGMSG_MOT_GET_STATUSUPDATE,
            MGMSG_MOT_MOVE_STOPPED,
            MGMSG_MOT_MOVE_COMPLETED,
        ],
        &[U16, I32, I32, U32],
    ),
    (
        &[
            MGMSG_MOT_SET_DCPIDPARAMS,
            MGMSG_MOT_GET_DCPIDPARAMS,
            MGMSG_MOT_SET_PMDJOYSTICKPARAMS,
            MGMSG_MOT_GET_PMDJOYSTICKPARAMS,
        ],
        &[U16, I32, I32, I32, I32, U16],
    ),
    (
        &[
            MGMSG_PZ_SET_OUTPUTLUTPARAMS,
            MGMSG_PZ_GET_OUTPUTLUTPARAMS,
            MGMSG_MOT_SET_SOL_CYCLEPARAMS,
            MGMSG_MOT_GET_SOL_CYCLEPARAMS,
        ],
        &[U16, U16, U16, I32, I32, I32, I32, U16, I32, U16],
    ),
    (&[MGMSG_MOT_GET_STATUSBITS], &[U16, I32, I32, I32, U16]),
    (&[MGMSG_PZ_GET_PZSTATUSBITS, MGMSG_PZ_GET_NTSTATUSBITS], &[U16, U32]),
    (
        &[MGMSG_MOT_SET_HOMEPARAMS, MGMSG_MOT_GET_HOMEPARAMS],
        &[U16, U16, U16, I32, I32],
    ),
    (
        &[MGMSG_MOT_SET_JOGPARAMS, MGMSG_MOT_GET_JOGPARAMS],
        &[U16, U16, I32, I32, I32, I32, U16],
    ),
    (
        &[MGMSG_MOT_SET_LIMSWITCHPARAMS, MGMSG_MOT_GET_LIMSWITCHPARAMS],
        &[U16, U16, U16, I32, I32, U16],
    ),
    (
        &[MGMSG_MOT_SET_POTPARAMS, MGMSG_MOT_GET_POTPARAMS],
        &[U16, U16, I32, U16, I32, U16, I32, U16, I32],
    ),
    (
        &[MGMSG_MOT_SET_BUTTONPARAMS, MGMSG_MOT_GET_BUTTONPARAMS],
        &[U16, U16, I32, I32, U16, U16],
    ),
    (
        &[
            MGMSG_MOT_SET_PMDPROFILEMODEPARAMS,
            MGMSG_MOT_GET_PMDPROFILEMODEPARAMS,
        ],
        &[U16, U16, U32, U16, U16],
    ),
    (
        &[
            MGMSG_MOT_SET_PMDPOSITIONLOOPPARAMS,
            MGMSG_MOT_GET_PMDPOSITIONLOOPPARAMS,
        ],
        &[U16, U16, U16, U32, U16, U16, U16, U16, U16, U32, U16, U16],
    ),
    (
        &[
            MGMSG_MOT_SET_PMDSTAGEAXISPARAMS,
            MGMSG_MOT_GET_PMDSTAGEAXISPARAMS,
        ],
        &[
            U16,
            U16,
            Bytes(16),
            U32,
            U32,
            I32,
            I32,
            I32,
            I32,
            I32,
            U16,
            U16,
            U16,
            U16,
            U32,
            U32,
            U32,
            U32,
        ],
    ),
    (
        &[MGMSG_PZ_SET_NTTRACKTHRESHOLD, MGMSG_PZ_GET_NTTRACKTHRESHOLD],
        &[F32],
    ),
    (
        &[MGMSG_PZ_SET_NTCIRCDIALUT, MGMSG_PZ_GET_NTCIRCDIALUT],
        WORDS_32,
    ),
    (
        &[MGMSG_PZ_SET_NTPHASECOMPPARAMS, MGMSG_PZ_GET_NTPHASECOMPPARAMS],
        &[U16, I16, I16],
    ),
    (
        &[MGMSG_PZ_SET_NTTIARANGEPARAMS, MGMSG_PZ_GET_NTTIARANGEPARAMS],
        &[U16, I16, I16, I16, U16, U16],
    ),
    (
        &[MGMSG_PZ_SET_NTGAINPARAMS, MGMSG_PZ_GET_NTGAINPARAMS],
        &[U16, I16],
    ),
    (
        &[
            MGMSG_PZ_SET_NTTIALPFILTERPARAMS,
            MGMSG_PZ_GET_NTTIALPFILTERPARAMS,
        ],
        &[I32],
    ),
    (
        &[MGMSG_NT_SET_TNAIOSETTINGS, MGMSG_NT_GET_TNAIOSETTINGS],
        &[I16, I16, Pad(4)],
    ),
    (&[MGMSG_PZ_GET_PZSTATUSUPDATE], &[U16, I16, I16, U32]),
    (&[MGMSG_HW_RICHRESPONSE], &[U16, U16, Bytes(64)]),
    (
        &[MGMSG_HW_GET_INFO],
        &[
            I32,
            Bytes(8),
            U16,
            U32,
            Bytes(48),
            Pad(12),
            U16,
            U16,
            U16,
        ],
    ),
    (&[MGMSG_RACK_GET_STATUSBITS], &[U32]),
    (&[MGMSG_MOT_GET_DCSTATUSUPDATE], &[U16, I32, U16, U16, U32]),
    (
        &[MGMSG_PZ_GET_NTCIRCCENTREPOS],
        &[U16, U16, F32, U16, U16, U16],
    ),
    (&[MGMSG_PZ_GET_NTTIAREADING], &[F32, U16, U16]),
    (
        &[MGMSG_PZ_GET_NTSTATUSUPDATE],
        &[U16, U16, U16, F32, U16, U16, U16, U32, I16, I16, I16],
    ),
    (&[MGMSG_LA_GET_STATUSUPDATE], &[U16, U16, U32]),
    (&[MGMSG_QUAD_GET_STATUSUPDATE], &[I16, I16, U16, I16, I16, U32]),
];
